use std::collections::HashMap;

use super::decorator::DecoratorStrategy;
use crate::utils::SheetError;

/// 加载字段类型定义
///
/// 从内置的 field_kinds.json 文件加载字段类型标签到装饰策略的映射
pub(crate) fn load_field_kinds() -> Result<HashMap<String, DecoratorStrategy>, SheetError> {
    let json_data = include_str!("../../data/field_kinds.json");
    Ok(serde_json::from_str(json_data)?)
}
