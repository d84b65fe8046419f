//! 路径回写：按点路径把值写回嵌套文档
//!
//! 每一步下降都返回子节点的可变引用，缺失的中间层会被创建为空对象。
//! 中间层原本是非空标量时，会被替换为空容器并记录在 [`MergeOutcome::displaced`] 中。

use serde_json::{Map, Value};

use crate::document::{Document, PATH_SEPARATOR};
use crate::flatten::FlatEntry;

/// 单次回写的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    /// 目标位置原来的值（新建时为 None）
    pub previous: Option<Value>,
    /// 被容器覆盖掉的标量所在路径
    pub displaced: Vec<String>,
}

impl MergeOutcome {
    /// 是否发生了标量被当作容器覆盖的情况
    pub fn has_collision(&self) -> bool {
        !self.displaced.is_empty()
    }
}

/// 把 `value` 写入 `doc` 的 `path` 处
///
/// 不会失败：缺失的中间层自动创建，末段直接覆盖原有的标量或容器。
pub fn merge(doc: &mut Document, path: &str, value: Value) -> MergeOutcome {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    let mut outcome = MergeOutcome::default();

    let Some((last, parents)) = segments.split_last() else {
        return outcome;
    };
    let Some((first, rest)) = parents.split_first() else {
        outcome.previous = doc.insert(last.to_string(), value);
        return outcome;
    };

    let mut walked = first.to_string();
    let mut current = doc.entry(first.to_string()).or_insert_with(empty_object);
    note_displaced(current, &walked, &mut outcome.displaced);

    for segment in rest {
        current = child_mut(current, segment);
        walked.push(PATH_SEPARATOR);
        walked.push_str(segment);
        note_displaced(current, &walked, &mut outcome.displaced);
    }

    outcome.previous = set_child(current, last, value);
    outcome
}

/// 依次回写一组扁平行
pub fn merge_all<I>(doc: &mut Document, entries: I) -> Vec<MergeOutcome>
where
    I: IntoIterator<Item = FlatEntry>,
{
    entries
        .into_iter()
        .map(|entry| merge(doc, &entry.path, entry.value))
        .collect()
}

/// 由扁平行重建文档
pub fn unflatten<I>(entries: I) -> Document
where
    I: IntoIterator<Item = FlatEntry>,
{
    let mut doc = Document::new();
    merge_all(&mut doc, entries);
    doc
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn note_displaced(slot: &Value, path: &str, displaced: &mut Vec<String>) {
    match slot {
        Value::Object(_) | Value::Array(_) | Value::Null => {}
        scalar => {
            tracing::warn!(path, previous = %scalar, "scalar replaced by a container during merge");
            displaced.push(path.to_string());
        }
    }
}

/// 段是否可以作为数组下标（规范十进制，且不超过长度；等于长度表示追加）
fn array_index(len: usize, segment: &str) -> Option<usize> {
    let idx: usize = segment.parse().ok()?;
    (idx.to_string() == segment && idx <= len).then_some(idx)
}

fn array_to_object(items: Vec<Value>) -> Document {
    items
        .into_iter()
        .enumerate()
        .map(|(idx, item)| (idx.to_string(), item))
        .collect()
}

/// 把任意值就地转换为对象并返回其映射
///
/// 数组按下标转成对象，标量与 null 被替换为空对象。
fn object_mut(value: &mut Value) -> &mut Document {
    if !value.is_object() {
        let map = match std::mem::take(value) {
            Value::Array(items) => array_to_object(items),
            _ => Map::new(),
        };
        *value = Value::Object(map);
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

fn child_mut<'a>(container: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = match container {
        Value::Array(items) => array_index(items.len(), segment),
        _ => None,
    };
    match (container, index) {
        (Value::Array(items), Some(idx)) => {
            if idx == items.len() {
                items.push(empty_object());
            }
            &mut items[idx]
        }
        (other, _) => object_mut(other)
            .entry(segment.to_string())
            .or_insert_with(empty_object),
    }
}

fn set_child(container: &mut Value, segment: &str, value: Value) -> Option<Value> {
    let index = match container {
        Value::Array(items) => array_index(items.len(), segment),
        _ => None,
    };
    match (container, index) {
        (Value::Array(items), Some(idx)) if idx == items.len() => {
            items.push(value);
            None
        }
        (Value::Array(items), Some(idx)) => Some(std::mem::replace(&mut items[idx], value)),
        (other, _) => object_mut(other).insert(segment.to_string(), value),
    }
}
