use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 内容元素（一条 CMS 记录的可翻译部分）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// 元素 ID
    #[serde(default)]
    pub id: Option<u64>,
    /// 标题，导出时作为顶层字段 `title`
    pub title: String,
    /// 别名，开启 `translate_slugs` 时作为顶层字段 `slug`
    #[serde(default)]
    pub slug: String,
    /// 字段列表（按布局顺序）
    #[serde(default)]
    pub fields: Vec<FieldValue>,
}

/// 单个字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldValue {
    /// 字段句柄，作为文档顶层键
    pub handle: String,
    /// 字段类型标签（如 "plain_text", "matrix"）
    pub kind: String,
    /// 字段是否允许翻译
    #[serde(default)]
    pub translatable: bool,
    /// 字段内容（标量或嵌套块数据）
    #[serde(default)]
    pub value: Value,
}

impl FieldValue {
    pub fn new(
        handle: impl Into<String>,
        kind: impl Into<String>,
        translatable: bool,
        value: Value,
    ) -> Self {
        Self {
            handle: handle.into(),
            kind: kind.into(),
            translatable,
            value,
        }
    }
}

impl Element {
    /// 按句柄查找字段
    pub fn field(&self, handle: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|f| f.handle == handle)
    }
}
