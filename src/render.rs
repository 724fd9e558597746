//! Template rendering: wrap the Handlebars engine, wire in the helper set,
//! and produce the final document from collected items.

use std::path::Path;

use anyhow::Result;
use handlebars::Handlebars;
use serde_json::json;
use tracing::warn;

use crate::collect;
use crate::directive::MARKER;
use crate::functions;
use crate::model::{GenerateOptions, Item};

/// Fallback used when the template file cannot be read.
const DEFAULT_TEMPLATE: &str = "|File|Directory|
|---|---|
{{#each this}}|{{filename}}|{{parentname}}|
{{/each}}";

/// Load the template body from `path`.
///
/// A leading directive line is generator metadata, not content, and is
/// stripped. A missing or unreadable file falls back to a built-in listing
/// template with a warning.
pub fn load_template(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(body) => strip_directive_line(&body).to_string(),
        Err(e) => {
            warn!("failed to load template [{path}], using the default: {e}");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

/// Drop the first line when it carries a directive marker.
fn strip_directive_line(body: &str) -> &str {
    if !body.starts_with(MARKER) {
        return body;
    }
    match body.split_once('\n') {
        Some((_, rest)) => rest,
        None => "",
    }
}

/// Notice header prepended when `include_header` is set.
fn notice_header(template_path: &str) -> String {
    let name = Path::new(template_path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| template_path.to_string());
    format!(
        "> This file was generated by [{name}]({name}) via yaml-readme, \
         please don't edit it directly!\n\n"
    )
}

/// Render the collected items through the template.
///
/// With a `group_by` key the template sees the grouped map, otherwise the
/// plain item array.
pub fn render(opts: &GenerateOptions, items: &[Item]) -> Result<String> {
    let mut body = load_template(&opts.template);
    if opts.include_header {
        body = format!("{}{}", notice_header(&opts.template), body);
    }

    let mut hb = Handlebars::new();
    // output is markdown, not HTML
    hb.register_escape_fn(handlebars::no_escape);
    functions::register_all(&mut hb, &body);

    let rendered = if opts.group_by.is_empty() {
        hb.render_template(&body, &json!(items))?
    } else {
        let groups = collect::group_items(items, &opts.group_by);
        hb.render_template(&body, &json!(groups))?
    };

    Ok(rendered)
}
