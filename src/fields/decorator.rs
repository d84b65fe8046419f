use serde::Deserialize;
use serde_json::Value;

use crate::document::{Document, is_container};
use crate::element::FieldValue;
use crate::flatten::flatten_value;
use crate::utils::count_words;

/// 字段装饰器 trait
///
/// 负责把某一类字段转换为文档条目，并统计其可翻译单词数
pub trait FieldDecorator: Send + Sync + std::fmt::Debug {
    /// 把字段转换为文档条目
    ///
    /// # 返回
    /// - `Some(Document)`: 要并入元素文档的条目（通常以字段句柄为键）
    /// - `None`: 该字段不参与翻译
    fn decorate(&self, field: &FieldValue) -> Option<Document>;

    /// 统计字段中可翻译文本的单词数
    fn word_count(&self, field: &FieldValue) -> usize;
}

/// 装饰策略（对应 field_kinds.json 中的值）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecoratorStrategy {
    /// 单值文本字段
    Standard,
    /// 块结构字段（矩阵、超级表格等）
    Block,
}

/// 单值文本字段：仅在字段可翻译且有值时导出
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardField;

impl FieldDecorator for StandardField {
    fn decorate(&self, field: &FieldValue) -> Option<Document> {
        if !field.translatable || field.value.is_null() {
            return None;
        }
        let mut doc = Document::new();
        doc.insert(field.handle.clone(), field.value.clone());
        Some(doc)
    }

    fn word_count(&self, field: &FieldValue) -> usize {
        if !field.translatable {
            return 0;
        }
        match &field.value {
            Value::String(text) => count_words(text),
            _ => 0,
        }
    }
}

/// 块结构字段：整棵块数据原样导出，`type` 等结构键由扁平化剔除
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockField;

impl FieldDecorator for BlockField {
    fn decorate(&self, field: &FieldValue) -> Option<Document> {
        if !is_container(&field.value) {
            return None;
        }
        let mut doc = Document::new();
        doc.insert(field.handle.clone(), field.value.clone());
        Some(doc)
    }

    fn word_count(&self, field: &FieldValue) -> usize {
        flatten_value(&field.value, Some(&field.handle))
            .iter()
            .filter_map(|entry| entry.value.as_str())
            .map(count_words)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_standard_field_requires_translatable() {
        let field = FieldValue::new("intro", "plain_text", true, json!("Hello there"));
        let doc = StandardField.decorate(&field).unwrap();
        assert_eq!(doc["intro"], "Hello there");
        assert_eq!(StandardField.word_count(&field), 2);

        let locked = FieldValue::new("intro", "plain_text", false, json!("Hello there"));
        assert!(StandardField.decorate(&locked).is_none());
        assert_eq!(StandardField.word_count(&locked), 0);

        let empty = FieldValue::new("intro", "plain_text", true, Value::Null);
        assert!(StandardField.decorate(&empty).is_none());
    }

    #[test]
    fn test_block_field_exports_whole_tree() {
        let field = FieldValue::new(
            "blocks",
            "matrix",
            false,
            json!({
                "0": { "type": "textBlock", "enabled": "1", "fields": { "text": "Two words" } },
                "1": { "type": "quoteBlock", "fields": { "quote": "Three more words" } }
            }),
        );

        let doc = BlockField.decorate(&field).unwrap();
        assert_eq!(doc["blocks"]["0"]["type"], "textBlock");
        // type 键不计入；"1" 不是单词
        assert_eq!(BlockField.word_count(&field), 5);

        let scalar = FieldValue::new("blocks", "matrix", false, json!("oops"));
        assert!(BlockField.decorate(&scalar).is_none());
    }

    #[test]
    fn test_strategy_deserialize() {
        let parsed: DecoratorStrategy = serde_json::from_str("\"block\"").unwrap();
        assert_eq!(parsed, DecoratorStrategy::Block);
    }
}
