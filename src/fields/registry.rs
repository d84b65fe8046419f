use std::collections::HashMap;
use std::sync::Arc;

use super::decorator::{BlockField, DecoratorStrategy, FieldDecorator, StandardField};
use crate::document::Document;
use crate::element::Element;
use crate::utils::{count_words, SheetError};

/// 字段装饰器注册表
///
/// 以字段类型标签查表选择装饰器，未注册的类型不参与导出
#[derive(Debug, Clone, Default)]
pub struct DecoratorRegistry {
    decorators: HashMap<String, Arc<dyn FieldDecorator>>,
}

impl DecoratorRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 从内置的 field_kinds.json 创建注册表
    ///
    /// # 错误
    /// 如果 JSON 解析失败，返回错误
    pub fn from_embedded_data() -> Result<Self, SheetError> {
        let mut registry = Self::new();
        for (kind, strategy) in super::load_field_kinds()? {
            let decorator: Arc<dyn FieldDecorator> = match strategy {
                DecoratorStrategy::Standard => Arc::new(StandardField),
                DecoratorStrategy::Block => Arc::new(BlockField),
            };
            registry.register(kind, decorator);
        }
        Ok(registry)
    }

    /// 注册（或替换）某个字段类型的装饰器
    pub fn register(&mut self, kind: impl Into<String>, decorator: Arc<dyn FieldDecorator>) {
        self.decorators.insert(kind.into(), decorator);
    }

    /// 查找字段类型对应的装饰器
    pub fn decorator_for(&self, kind: &str) -> Result<&dyn FieldDecorator, SheetError> {
        self.decorators
            .get(kind)
            .map(|d| d.as_ref())
            .ok_or_else(|| SheetError::UnknownFieldKind(kind.to_string()))
    }

    /// 把元素的全部字段转换为文档（不含 title/slug）
    ///
    /// 后出现的同名键覆盖先前的值，但保留首次出现的位置。
    pub fn decorate_element(&self, element: &Element) -> Document {
        let mut doc = Document::new();
        for field in &element.fields {
            let decorator = match self.decorator_for(&field.kind) {
                Ok(decorator) => decorator,
                Err(e) => {
                    tracing::warn!(handle = %field.handle, "{}", e);
                    continue;
                }
            };
            if let Some(entries) = decorator.decorate(field) {
                doc.extend(entries);
            }
        }
        doc
    }

    /// 元素总单词数：标题 + 别名 + 各字段
    pub fn element_word_count(&self, element: &Element) -> usize {
        let fields: usize = element
            .fields
            .iter()
            .filter_map(|field| self.decorator_for(&field.kind).ok().map(|d| d.word_count(field)))
            .sum();
        count_words(&element.title) + count_words(&element.slug) + fields
    }
}
