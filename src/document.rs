//! 文档模型：字段内容的嵌套键值树

use serde_json::{Map, Value};

use crate::utils::SheetError;

/// 嵌套文档（键顺序即插入顺序）
pub type Document = Map<String, Value>;

/// 路径分隔符
pub const PATH_SEPARATOR: char = '.';

/// 从 JSON 值构造文档，顶层必须是对象
pub fn document_from_value(value: Value) -> Result<Document, SheetError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(SheetError::InvalidDocument(format!(
            "top-level value must be an object, found {}",
            kind_name(&other)
        ))),
    }
}

/// 判断是否为容器（对象或数组）
pub fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// 将标量渲染为表格单元格文本
///
/// - 字符串原样输出
/// - 数字使用 JSON 表示
/// - `true` 输出 `"1"`，`false` 与 `null` 输出空串
pub fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) | Value::Null => String::new(),
        // 容器不是叶子，调用方不应传入
        Value::Object(_) | Value::Array(_) => String::new(),
    }
}

pub(crate) fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}
