//! Targeted content fixes for a generated question-bank JSON file
//!
//! Authoring fixes arrive as "replace the `content` of question N with this
//! text". The file is treated as opaque JSON values rather than typed
//! records on purpose: patching must round-trip whatever extra fields the
//! entries have accumulated, and performs no schema validation.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

/// Result of one patch run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PatchSummary {
    /// Entries whose `content` was overwritten.
    pub patched: usize,
    /// Requested orders with no matching entry in the file.
    pub unmatched: Vec<u32>,
}

/// Overwrite the `content` field of every entry in the JSON array at
/// `path` whose `order` matches a key of `updates`. The file is rewritten
/// in place with two-space indentation.
pub fn patch_content(path: &Path, updates: &BTreeMap<u32, String>) -> Result<PatchSummary> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let mut data: Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;

    let Some(entries) = data.as_array_mut() else {
        bail!("{} does not contain a JSON array", path.display());
    };

    let mut summary = PatchSummary::default();
    let mut matched: Vec<u32> = Vec::new();

    for entry in entries.iter_mut() {
        let Some(order) = entry.get("order").and_then(Value::as_u64) else {
            continue;
        };
        let Ok(order) = u32::try_from(order) else {
            continue;
        };
        if let Some(content) = updates.get(&order) {
            entry["content"] = Value::String(content.clone());
            summary.patched += 1;
            matched.push(order);
            debug!("patched content of question {order}");
        }
    }

    for order in updates.keys() {
        if !matched.contains(order) {
            warn!("no entry with order {order} in {}", path.display());
            summary.unmatched.push(*order);
        }
    }

    let mut serialized = serde_json::to_string_pretty(&data)?;
    serialized.push('\n');
    fs::write(path, serialized)
        .with_context(|| format!("writing {}", path.display()))?;

    Ok(summary)
}

/// Parse an updates file: a JSON object whose keys are question numbers
/// and whose values are the replacement content.
pub fn load_updates(path: &Path) -> Result<BTreeMap<u32, String>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let map: BTreeMap<String, String> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;

    let mut updates = BTreeMap::new();
    for (key, content) in map {
        let order: u32 = key
            .parse()
            .with_context(|| format!("updates key {key:?} is not a question number"))?;
        updates.insert(order, content);
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    fn write_bank(dir: &Path, json: &str) -> std::path::PathBuf {
        let path = dir.join("questions.json");
        fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn patches_matching_entries_and_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bank(
            dir.path(),
            indoc! {r#"
                [
                  { "order": 1, "headline": "Q1", "images": [], "content": "old" },
                  { "order": 2, "headline": "Q2", "images": ["image3"], "content": "keep", "prompt": "raw ocr" }
                ]
            "#},
        );

        let updates = BTreeMap::from([(1, "new explanation".to_string())]);
        let summary = patch_content(&path, &updates).unwrap();
        assert_eq!(summary.patched, 1);
        assert!(summary.unmatched.is_empty());

        let data: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(data[0]["content"], "new explanation");
        assert_eq!(data[1]["content"], "keep");
        // unknown fields round-trip untouched
        assert_eq!(data[1]["prompt"], "raw ocr");
    }

    #[test]
    fn patches_multiple_orders_in_one_run() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bank(
            dir.path(),
            r#"[{"order":13,"content":"a"},{"order":14,"content":"b"},{"order":15,"content":"c"}]"#,
        );

        let updates = BTreeMap::from([
            (13, "x".to_string()),
            (15, "z".to_string()),
        ]);
        let summary = patch_content(&path, &updates).unwrap();
        assert_eq!(summary.patched, 2);

        let data: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(data[0]["content"], "x");
        assert_eq!(data[1]["content"], "b");
        assert_eq!(data[2]["content"], "z");
    }

    #[test]
    fn unmatched_orders_are_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bank(dir.path(), r#"[{"order":1,"content":"a"}]"#);

        let updates = BTreeMap::from([(99, "ghost".to_string())]);
        let summary = patch_content(&path, &updates).unwrap();
        assert_eq!(summary.patched, 0);
        assert_eq!(summary.unmatched, vec![99]);
    }

    #[test]
    fn entries_without_order_are_left_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bank(
            dir.path(),
            r#"[{"note":"not a question"},{"order":2,"content":"old"}]"#,
        );

        let updates = BTreeMap::from([(2, "new".to_string())]);
        let summary = patch_content(&path, &updates).unwrap();
        assert_eq!(summary.patched, 1);

        let data: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(data[0]["note"], "not a question");
        assert_eq!(data[1]["content"], "new");
    }

    #[test]
    fn non_array_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bank(dir.path(), r#"{"order":1}"#);

        let updates = BTreeMap::from([(1, "x".to_string())]);
        assert!(patch_content(&path, &updates).is_err());
    }

    #[test]
    fn loads_updates_file_with_string_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json");
        fs::write(&path, r#"{"13": "thirteen", "15": "fifteen"}"#).unwrap();

        let updates = load_updates(&path).unwrap();
        assert_eq!(
            updates,
            BTreeMap::from([(13, "thirteen".to_string()), (15, "fifteen".to_string())])
        );
    }

    #[test]
    fn rejects_updates_file_with_non_numeric_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json");
        fs::write(&path, r#"{"first": "oops"}"#).unwrap();

        assert!(load_updates(&path).is_err());
    }
}
