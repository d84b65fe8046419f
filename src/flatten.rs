//! 扁平化：把嵌套文档展开为 `a.0.b` 形式的点路径行

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::document::{Document, PATH_SEPARATOR};

/// 结构标记键，整棵子树都不导出
pub const SKIPPED_KEY: &str = "type";

/// 一个叶子标量及其完整路径
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatEntry {
    /// 点分隔的键链
    pub path: String,
    /// 叶子值（不会是对象或数组）
    pub value: Value,
}

impl FlatEntry {
    pub fn new(path: impl Into<String>, value: Value) -> Self {
        Self { path: path.into(), value }
    }
}

/// 展开整个文档
///
/// 深度优先，按首次出现的顺序输出。空文档和空容器不产生任何行。
/// 含分隔符的键可能与真实的嵌套路径重名，重名路径会以 warn 级别记录。
pub fn flatten(doc: &Document) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    walk_map(&mut out, doc, None);
    warn_duplicates(&out);
    out
}

/// 在给定前缀下展开任意值
///
/// 前缀为 `None` 时从根开始；此时标量值输出路径为空串的一行。
pub fn flatten_value(value: &Value, prefix: Option<&str>) -> Vec<FlatEntry> {
    let mut out = Vec::new();
    walk(&mut out, value, prefix);
    warn_duplicates(&out);
    out
}

/// 出现不止一次的路径（按首次重复的顺序）
pub fn duplicate_paths(entries: &[FlatEntry]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for entry in entries {
        let path = entry.path.as_str();
        if !seen.insert(path) && !duplicates.contains(&path) {
            duplicates.push(path);
        }
    }
    duplicates
}

fn warn_duplicates(entries: &[FlatEntry]) {
    for path in duplicate_paths(entries) {
        tracing::warn!(path, "several leaves flatten to the same path");
    }
}

/// 根节点下的键直接作为路径；其余情况总是加一段，空键也不例外
fn join(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        None => key.to_string(),
        Some(prefix) => format!("{}{}{}", prefix, PATH_SEPARATOR, key),
    }
}

fn walk(out: &mut Vec<FlatEntry>, value: &Value, path: Option<&str>) {
    match value {
        Value::Object(map) => walk_map(out, map, path),
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                walk(out, child, Some(&join(path, &idx.to_string())));
            }
        }
        scalar => out.push(FlatEntry::new(path.unwrap_or_default(), scalar.clone())),
    }
}

fn walk_map(out: &mut Vec<FlatEntry>, map: &Document, path: Option<&str>) {
    for (key, child) in map {
        if key == SKIPPED_KEY {
            continue;
        }
        walk(out, child, Some(&join(path, key)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document_from_value;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        document_from_value(value).unwrap()
    }

    fn paths(entries: &[FlatEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_flatten_nested() {
        let d = doc(json!({
            "title": "Hello",
            "body": {
                "0": { "heading": "Intro", "text": "Lorem" },
                "1": { "heading": "More" }
            }
        }));

        let flat = flatten(&d);
        assert_eq!(
            paths(&flat),
            vec!["title", "body.0.heading", "body.0.text", "body.1.heading"]
        );
        assert_eq!(flat[2].value, json!("Lorem"));
    }

    #[test]
    fn test_type_subtree_skipped_at_every_depth() {
        let d = doc(json!({
            "type": "entry",
            "blocks": {
                "0": {
                    "type": { "handle": "textBlock", "id": 3 },
                    "fields": { "text": "hi", "type": "plain" }
                }
            }
        }));

        let flat = flatten(&d);
        assert_eq!(paths(&flat), vec!["blocks.0.fields.text"]);
        assert!(flat.iter().all(|e| !e.path.split('.').any(|s| s == "type")));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(flatten(&Document::new()).is_empty());

        let d = doc(json!({ "matrix": {}, "list": [], "title": "x" }));
        assert_eq!(paths(&flatten(&d)), vec!["title"]);
    }

    #[test]
    fn test_arrays_flatten_by_index() {
        let d = doc(json!({ "tags": ["a", { "label": "b" }] }));
        assert_eq!(paths(&flatten(&d)), vec!["tags.0", "tags.1.label"]);
    }

    #[test]
    fn test_scalars_of_every_kind_are_leaves() {
        let d = doc(json!({ "n": 3, "b": true, "z": null }));
        let flat = flatten(&d);
        assert_eq!(flat.len(), 3);
        assert_eq!(flat[2], FlatEntry::new("z", Value::Null));
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let d = doc(json!({ "a": { "x": 1, "y": [2, 3] }, "b": "c" }));
        assert_eq!(flatten(&d), flatten(&d));
    }

    #[test]
    fn test_flatten_value_with_prefix() {
        let flat = flatten_value(&json!({ "text": "hi" }), Some("blocks.0"));
        assert_eq!(paths(&flat), vec!["blocks.0.text"]);

        let flat = flatten_value(&json!("leaf"), Some("title"));
        assert_eq!(flat, vec![FlatEntry::new("title", json!("leaf"))]);

        let flat = flatten_value(&json!("leaf"), None);
        assert_eq!(flat, vec![FlatEntry::new("", json!("leaf"))]);
    }

    #[test]
    fn test_empty_key_keeps_its_segment() {
        let d = doc(json!({ "": { "b": "x", "": "z" }, "b": "y" }));
        let flat = flatten(&d);

        assert_eq!(paths(&flat), vec![".b", ".", "b"]);
        assert!(duplicate_paths(&flat).is_empty());

        let flat = flatten_value(&json!({ "": "v" }), Some("blocks"));
        assert_eq!(paths(&flat), vec!["blocks."]);
    }

    #[test]
    fn test_dotted_key_collision_is_detected() {
        let d = doc(json!({ "a.b": "x", "a": { "b": "y" }, "c": "z" }));
        let flat = flatten(&d);

        assert_eq!(paths(&flat), vec!["a.b", "a.b", "c"]);
        assert_eq!(duplicate_paths(&flat), vec!["a.b"]);
    }
}
