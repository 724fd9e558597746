//! Markdown link helpers.

use std::sync::OnceLock;

use regex::Regex;

fn markdown_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r".*\[.*\]\(.*\)").expect("valid regex"))
}

fn link_wrapper_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[.*\]\(.*/|\)").expect("valid regex"))
}

/// Markdown-style link, or the bare text when the url is empty.
pub fn link(text: &str, url: &str) -> String {
    if url.is_empty() {
        text.to_string()
    } else {
        format!("[{text}]({url})")
    }
}

/// Like [`link`], but empty when there is nothing to link to.
pub fn link_or_empty(text: &str, url: &str) -> String {
    if url.is_empty() {
        String::new()
    } else {
        link(text, url)
    }
}

/// `:octocat:` link to a GitHub profile, empty for an empty user.
pub fn github_emoji_link(user: &str) -> String {
    if user.is_empty() {
        String::new()
    } else {
        link(":octocat:", &format!("https://github.com/{user}"))
    }
}

/// Whether the text already contains a markdown-style link.
pub fn has_link(text: &str) -> bool {
    markdown_link_re().is_match(text)
}

/// Extract the id from a profile link like `[name](https://github.com/id)`.
pub fn id_from_link(link: &str) -> String {
    link_wrapper_re().replace_all(link, "").to_string()
}
