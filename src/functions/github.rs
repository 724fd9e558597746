//! GitHub-derived template fragments: contributor tables, badges, and user
//! links, backed by the GitHub REST API.
//!
//! Helpers run inside synchronous template rendering, so API access bridges
//! into the ambient Tokio runtime; on any failure a helper degrades to its
//! input (or empty output) instead of failing the render.

use serde_json::Value;
use tracing::warn;

use super::link::{has_link, id_from_link, link};

const API_ROOT: &str = "https://api.github.com";

/// Cells per row in the contributors table.
const CONTRIBUTOR_COLUMNS: usize = 6;

/// Resolve a GitHub user id to a markdown display-name link.
///
/// Ids containing spaces are not valid GitHub ids and pass through
/// unchanged, as does text that already carries a markdown link (unless
/// `bio` is requested, in which case the id is re-resolved).
pub fn user_link(id: &str, bio: bool) -> String {
    if id.contains(' ') {
        return id.to_string();
    }
    if has_link(id) {
        if bio {
            return user_link(&id_from_link(id), bio);
        }
        return id.to_string();
    }

    let Some(data) = request_json(&format!("{API_ROOT}/users/{id}")) else {
        return id.to_string();
    };

    let name = data["name"].as_str().unwrap_or(id);
    let url = data["html_url"].as_str().unwrap_or_default();
    let mut out = link(name, url);
    if bio {
        if let Some(bio_text) = data["bio"].as_str() {
            out = format!("{out} ({bio_text})");
        }
    }
    out
}

/// Link every id in a separated list of GitHub ids.
pub fn users_link(ids: &str, sep: &str) -> String {
    let sep = if sep.is_empty() { " " } else { sep };
    let items: Vec<String> = ids
        .split(sep)
        .map(|item| user_link(item.trim(), false))
        .collect();

    // a comma-separated list reads better with a space after each comma
    let joiner = if sep == "," { ", " } else { sep };
    items.join(joiner)
}

/// HTML table of repository contributors.
pub fn contributors(owner: &str, repo: &str) -> String {
    let api = format!("{API_ROOT}/repos/{owner}/{repo}/contributors");
    match request_json(&api) {
        Some(Value::Array(entries)) => contributors_table(&entries),
        _ => String::new(),
    }
}

/// Build the contributors table from the raw API entries.
pub fn contributors_table(entries: &[Value]) -> String {
    let mut rows = String::new();

    for chunk in entries.chunks(CONTRIBUTOR_COLUMNS) {
        rows.push_str("<tr>");
        for entry in chunk {
            let login = entry["login"].as_str().unwrap_or_default();
            let html_url = entry["html_url"].as_str().unwrap_or_default();
            let avatar_url = entry["avatar_url"].as_str().unwrap_or_default();
            rows.push_str(&format!(
                "<td align=\"center\"><a href=\"{html_url}\">\
                 <img src=\"{avatar_url}\" width=\"100;\" alt=\"{login}\"/>\
                 <br /><sub><b>{login}</b></sub></a></td>"
            ));
        }
        rows.push_str("</tr>");
    }

    format!("<table>{rows}</table>\n")
}

/// star-history.com chart link for a repository.
pub fn star_history(owner: &str, repo: &str) -> String {
    format!(
        "[![Star History Chart](https://api.star-history.com/svg?repos={owner}/{repo}&type=Date)]\
         (https://star-history.com/#{owner}/{repo}&Date)"
    )
}

/// Visitor-counter badge.
pub fn visitor_count(id: &str) -> String {
    format!("![Visitor Count](https://profile-counter.glitch.me/{id}/count.svg)")
}

/// Fetch a JSON document from the GitHub API, or None on any failure.
fn request_json(api: &str) -> Option<Value> {
    let handle = tokio::runtime::Handle::try_current().ok()?;
    let result = tokio::task::block_in_place(|| handle.block_on(fetch(api)));
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("GitHub request failed: {e:#}");
            None
        }
    }
}

async fn fetch(api: &str) -> anyhow::Result<Value> {
    let client = reqwest::Client::new();
    let mut request = client.get(api).header(
        "User-Agent",
        concat!("yaml-readme/", env!("CARGO_PKG_VERSION")),
    );

    let token = std::env::var("GITHUB_TOKEN")
        .or_else(|_| std::env::var("GH_TOKEN"))
        .unwrap_or_default();
    if !token.is_empty() {
        request = request.header("Authorization", format!("token {token}"));
    }

    let response = request.send().await?;
    if !response.status().is_success() {
        anyhow::bail!("{api}: HTTP {}", response.status());
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_contributors_table() {
        let entries = vec![
            json!({
                "login": "alice",
                "html_url": "https://github.com/alice",
                "avatar_url": "https://avatars.example.com/alice.png",
            }),
            json!({
                "login": "bob",
                "html_url": "https://github.com/bob",
                "avatar_url": "https://avatars.example.com/bob.png",
            }),
        ];

        let table = contributors_table(&entries);
        assert!(table.starts_with("<table><tr>"));
        assert!(table.contains("<a href=\"https://github.com/alice\">"));
        assert!(table.contains("<sub><b>bob</b></sub>"));
        assert_eq!(table.matches("<tr>").count(), 1);
    }

    #[test]
    fn test_contributors_table_wraps_rows() {
        let entries: Vec<Value> = (0..8)
            .map(|i| {
                json!({
                    "login": format!("user{i}"),
                    "html_url": format!("https://github.com/user{i}"),
                    "avatar_url": format!("https://avatars.example.com/user{i}.png"),
                })
            })
            .collect();

        // 8 contributors at 6 per row means 2 rows
        let table = contributors_table(&entries);
        assert_eq!(table.matches("<tr>").count(), 2);
    }

    #[test]
    fn test_star_history() {
        let out = star_history("linuxsuren", "yaml-readme");
        assert!(out.contains("https://api.star-history.com/svg?repos=linuxsuren/yaml-readme"));
        assert!(out.contains("https://star-history.com/#linuxsuren/yaml-readme&Date"));
    }

    #[test]
    fn test_visitor_count() {
        assert_eq!(
            visitor_count("linuxsuren"),
            "![Visitor Count](https://profile-counter.glitch.me/linuxsuren/count.svg)"
        );
    }

    #[test]
    fn test_user_link_passes_through_without_runtime() {
        // No Tokio runtime in a plain unit test, so no API call is made and
        // the id comes back unchanged.
        assert_eq!(user_link("linuxsuren", false), "linuxsuren");
    }

    #[test]
    fn test_user_link_keeps_existing_link() {
        let already = "[Rick](https://github.com/LinuxSuRen)";
        assert_eq!(user_link(already, false), already);
    }

    #[test]
    fn test_user_link_rejects_spaces() {
        assert_eq!(user_link("not an id", false), "not an id");
    }

    #[test]
    fn test_users_link_comma_separated() {
        // Without a runtime each id passes through; the join adds a space.
        assert_eq!(users_link("alice,bob", ","), "alice, bob");
    }
}
