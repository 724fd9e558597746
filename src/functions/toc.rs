//! Table-of-contents generation from a template's own markdown headings.

/// Build a TOC from the `##` and `###` headings in `body`.
///
/// Headings whose text contains whitespace have no stable anchor form and
/// are skipped.
pub fn generate_toc(body: &str) -> String {
    let mut toc = String::new();

    for line in body.lines() {
        let (prefix, tag) = if let Some(tag) = line.strip_prefix("## ") {
            ("- ", tag)
        } else if let Some(tag) = line.strip_prefix("### ") {
            (" - ", tag)
        } else {
            continue;
        };

        let tag = tag.trim();
        if tag.split(' ').count() > 1 {
            continue;
        }

        toc.push_str(&format!("{prefix}[{tag}](#{})\n", tag.to_lowercase()));
    }

    toc
}
