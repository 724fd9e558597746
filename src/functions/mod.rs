//! Template helper functions.
//!
//! Every helper registered here is discoverable through the `functions` CLI
//! command; keep `FUNCTION_NAMES` in sync when adding one.

pub mod github;
pub mod link;
pub mod toc;

use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperResult, Output, RenderContext,
};
use serde_json::Value;

/// Helper names available inside templates.
pub const FUNCTION_NAMES: &[&str] = &[
    "ghEmojiLink",
    "ghUserLink",
    "ghUsersLink",
    "link",
    "linkOrEmpty",
    "printContributors",
    "printStarHistory",
    "printToc",
    "printVisitorCount",
    "render",
];

/// Render a metadata value for display: booleans become check/cross emoji,
/// strings pass through, anything else is blank.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Bool(true) => ":white_check_mark:".to_string(),
        Value::Bool(false) => ":x:".to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

handlebars_helper!(render: |v: Json| render_value(v));
handlebars_helper!(link_fn: |text: str, url: str| link::link(text, url));
handlebars_helper!(link_or_empty: |text: str, url: str| link::link_or_empty(text, url));
handlebars_helper!(gh_emoji_link: |user: str| link::github_emoji_link(user));
handlebars_helper!(gh_user_link: |id: str| github::user_link(id, false));
handlebars_helper!(gh_users_link: |ids: str, sep: str| github::users_link(ids, sep));
handlebars_helper!(print_contributors: |owner: str, repo: str| github::contributors(owner, repo));
handlebars_helper!(print_star_history: |owner: str, repo: str| github::star_history(owner, repo));
handlebars_helper!(print_visitor_count: |id: str| github::visitor_count(id));

/// Register the full helper set on an engine.
///
/// `template` is the body being rendered; `printToc` scans it for headings,
/// so it is captured here rather than read back at render time.
pub fn register_all(hb: &mut Handlebars, template: &str) {
    hb.register_helper("render", Box::new(render));
    hb.register_helper("link", Box::new(link_fn));
    hb.register_helper("linkOrEmpty", Box::new(link_or_empty));
    hb.register_helper("ghEmojiLink", Box::new(gh_emoji_link));
    hb.register_helper("ghUserLink", Box::new(gh_user_link));
    hb.register_helper("ghUsersLink", Box::new(gh_users_link));
    hb.register_helper("printContributors", Box::new(print_contributors));
    hb.register_helper("printStarHistory", Box::new(print_star_history));
    hb.register_helper("printVisitorCount", Box::new(print_visitor_count));

    let body = toc::generate_toc(template);
    hb.register_helper(
        "printToc",
        Box::new(
            move |_h: &Helper,
                  _hb: &Handlebars,
                  _ctx: &Context,
                  _rc: &mut RenderContext,
                  out: &mut dyn Output|
                  -> HelperResult {
                out.write(&body)?;
                Ok(())
            },
        ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!(true)), ":white_check_mark:");
        assert_eq!(render_value(&json!(false)), ":x:");
        assert_eq!(render_value(&json!("text")), "text");
        assert_eq!(render_value(&json!(42)), "");
        assert_eq!(render_value(&json!(["a"])), "");
    }

    #[test]
    fn test_function_names_sorted() {
        let mut sorted = FUNCTION_NAMES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, FUNCTION_NAMES);
    }

    #[test]
    fn test_helpers_render_inside_template() {
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        register_all(&mut hb, "## Usage\n");

        let out = hb
            .render_template(
                "{{render done}} {{link \"text\" \"url\"}} {{printVisitorCount \"me\"}}",
                &json!({"done": true}),
            )
            .unwrap();
        assert_eq!(
            out,
            ":white_check_mark: [text](url) ![Visitor Count](https://profile-counter.glitch.me/me/count.svg)"
        );
    }

    #[test]
    fn test_print_toc_helper() {
        let template = "{{printToc}}\n## Usage\n### Install\n";
        let mut hb = Handlebars::new();
        hb.register_escape_fn(handlebars::no_escape);
        register_all(&mut hb, template);

        let out = hb.render_template(template, &json!([])).unwrap();
        assert!(out.contains("- [Usage](#usage)"));
        assert!(out.contains(" - [Install](#install)"));
    }
}
