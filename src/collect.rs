//! Metadata collection: locate YAML files via a glob pattern and prepare
//! the item list for rendering.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Result;
use glob::glob;
use serde_json::Value;
use tracing::warn;

use crate::model::Item;

/// Collect metadata items matching the glob pattern.
///
/// Unreadable or unparseable files are skipped with a warning so one broken
/// file does not sink the whole run. Items carrying `ignore: true` are
/// dropped. Every surviving item gains `filename`, `parentname`, and
/// `fullpath` entries.
pub fn collect_items(pattern: &str) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for entry in glob(pattern)? {
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                warn!("skipping unreadable glob entry: {e}");
                continue;
            }
        };

        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                warn!("failed to read file [{}]: {e}", path.display());
                continue;
            }
        };

        let mut item: Item = match serde_yaml::from_str(&data) {
            Ok(item) => item,
            Err(e) => {
                warn!("failed to parse file [{}] as YAML: {e}", path.display());
                continue;
            }
        };

        if item.get("ignore").and_then(Value::as_bool) == Some(true) {
            continue;
        }

        decorate(&mut item, &path);
        items.push(item);
    }

    Ok(items)
}

/// Inject the per-file variables every template can rely on.
fn decorate(item: &mut Item, path: &Path) {
    let filename = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let parentname = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();

    item.insert("filename".to_string(), Value::String(filename));
    item.insert("parentname".to_string(), Value::String(parentname));
    item.insert(
        "fullpath".to_string(),
        Value::String(path.display().to_string()),
    );
}

/// Stable-sort items by a field compared as strings.
///
/// A `!` prefix on the field reverses the order. Items whose field is
/// missing or not a string keep their relative position.
pub fn sort_items(items: &mut [Item], sort_by: &str) {
    let (key, descending) = match sort_by.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (sort_by, false),
    };

    items.sort_by(|a, b| {
        let (Some(left), Some(right)) = (
            a.get(key).and_then(Value::as_str),
            b.get(key).and_then(Value::as_str),
        ) else {
            return std::cmp::Ordering::Equal;
        };
        if descending {
            right.cmp(left)
        } else {
            left.cmp(right)
        }
    });
}

/// Group items by a field.
///
/// The field value may be a string or an integer; items without the field,
/// or with an empty value, land in no group. Groups come back in sorted
/// key order so output is deterministic.
pub fn group_items(items: &[Item], group_by: &str) -> BTreeMap<String, Vec<Item>> {
    let mut groups: BTreeMap<String, Vec<Item>> = BTreeMap::new();

    for item in items {
        let key = match item.get(group_by) {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) if n.is_i64() => n.to_string(),
            _ => continue,
        };
        groups.entry(key).or_default().push(item.clone());
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(pairs: &[(&str, Value)]) -> Item {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_collect_items() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("alpha.yaml"), "name: alpha\nkind: tool\n").unwrap();
        std::fs::write(
            dir.path().join("beta.yaml"),
            "name: beta\nkind: lib\nignore: true\n",
        )
        .unwrap();
        // A sequence is valid YAML but not a metadata map
        std::fs::write(dir.path().join("broken.yaml"), "- just\n- a list\n").unwrap();

        let pattern = format!("{}/*.yaml", dir.path().display());
        let items = collect_items(&pattern).unwrap();

        // beta is ignored, broken is skipped
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["name"], json!("alpha"));
        assert_eq!(items[0]["filename"], json!("alpha"));
        assert_eq!(
            items[0]["parentname"],
            json!(dir.path().file_name().unwrap().to_string_lossy())
        );
        assert_eq!(
            items[0]["fullpath"],
            json!(dir.path().join("alpha.yaml").display().to_string())
        );
    }

    #[test]
    fn test_collect_items_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = format!("{}/*.yaml", dir.path().display());
        assert!(collect_items(&pattern).unwrap().is_empty());
    }

    #[test]
    fn test_sort_items_normal() {
        let mut items = vec![
            item(&[("name", json!("b"))]),
            item(&[("name", json!("c"))]),
            item(&[("name", json!("a"))]),
        ];
        sort_items(&mut items, "name");
        assert_eq!(items[0]["name"], json!("a"));
        assert_eq!(items[2]["name"], json!("c"));
    }

    #[test]
    fn test_sort_items_number_strings() {
        // String comparison, so "1" sorts before "11"
        let mut items = vec![
            item(&[("name", json!("12"))]),
            item(&[("name", json!("13"))]),
            item(&[("name", json!("11"))]),
            item(&[("name", json!("1"))]),
        ];
        sort_items(&mut items, "name");
        assert_eq!(items[0]["name"], json!("1"));
    }

    #[test]
    fn test_sort_items_reversed() {
        let mut items = vec![
            item(&[("name", json!("b"))]),
            item(&[("name", json!("c"))]),
            item(&[("name", json!("a"))]),
        ];
        sort_items(&mut items, "!name");
        assert_eq!(items[0]["name"], json!("c"));
        assert_eq!(items[2]["name"], json!("a"));
    }

    #[test]
    fn test_sort_items_non_string_values_keep_order() {
        let mut items = vec![
            item(&[("name", json!([1, 2])), ("pos", json!("first"))]),
            item(&[("name", json!([3])), ("pos", json!("second"))]),
        ];
        sort_items(&mut items, "name");
        assert_eq!(items[0]["pos"], json!("first"));
        assert_eq!(items[1]["pos"], json!("second"));
    }

    #[test]
    fn test_group_items() {
        let items = vec![
            item(&[("name", json!("a")), ("kind", json!("tool"))]),
            item(&[("name", json!("b")), ("kind", json!("lib"))]),
            item(&[("name", json!("c")), ("kind", json!("tool"))]),
            item(&[("name", json!("d"))]),
            item(&[("name", json!("e")), ("kind", json!(""))]),
            item(&[("name", json!("f")), ("kind", json!(2024))]),
        ];

        let groups = group_items(&items, "kind");
        assert_eq!(groups.len(), 3);
        assert_eq!(groups["tool"].len(), 2);
        assert_eq!(groups["lib"].len(), 1);
        assert_eq!(groups["2024"][0]["name"], json!("f"));
    }
}
