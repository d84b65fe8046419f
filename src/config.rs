//! 运行配置：显式传入导出/导入流程，不读取全局状态

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::selection::{ColumnPolicy, FlagMatch};
use crate::utils::SheetError;

/// 导出/导入设置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 是否把别名作为顶层字段 `slug` 一并导出
    pub translate_slugs: bool,
    /// 结构性标记的匹配方式
    pub flag_match: FlagMatch,
    /// 导出文件目录（为空时由调用方决定）
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// 从 JSON 文件加载，缺失的键使用默认值
    pub fn load(path: &Path) -> Result<Self, SheetError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// 导入时使用的列选择策略
    pub fn column_policy(&self) -> ColumnPolicy {
        ColumnPolicy::new(self.flag_match)
    }
}
