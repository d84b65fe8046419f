//! 列选择策略：决定导入行取 B 列（原文）还是 C 列（译文）

use serde::{Deserialize, Serialize};

use crate::document::PATH_SEPARATOR;
use crate::sheet::{ImportLine, HEADER_HANDLE};

/// 结构性标记，不属于可翻译文本，导入时保留原文列
pub const STRUCTURAL_FLAGS: &[&str] = &["enabled", "collapsed"];

/// 结构性标记的匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlagMatch {
    /// 某一段路径与标记完全相等
    #[default]
    Segment,
    /// 旧行为：标记首次出现的位置大于 0 即命中（`a.enabledDate` 会命中，
    /// 但以标记开头的路径如 `enabledX.0.text` 不会）
    Substring,
}

/// 表格中的列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    /// B 列：原文
    Raw,
    /// C 列：译文
    Translated,
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Raw => write!(f, "RAW"),
            Column::Translated => write!(f, "TRANSLATED"),
        }
    }
}

/// 导入行被跳过的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// 表头行（路径为 `HANDLE`）
    Header,
    /// 路径为空
    EmptyPath,
}

/// 列选择策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnPolicy {
    pub flag_match: FlagMatch,
}

impl ColumnPolicy {
    pub fn new(flag_match: FlagMatch) -> Self {
        Self { flag_match }
    }

    /// 兼容旧行为：子串匹配
    pub fn legacy() -> Self {
        Self::new(FlagMatch::Substring)
    }

    /// 多段路径是否命中结构性标记
    pub fn is_structural(&self, path: &str) -> bool {
        match self.flag_match {
            FlagMatch::Segment => path
                .split(PATH_SEPARATOR)
                .any(|segment| STRUCTURAL_FLAGS.iter().any(|flag| *flag == segment)),
            FlagMatch::Substring => STRUCTURAL_FLAGS
                .iter()
                .any(|flag| matches!(path.find(flag), Some(pos) if pos > 0)),
        }
    }

    /// 路径对应应取的列
    ///
    /// - 单段路径（顶层字段）：译文
    /// - 多段路径且命中结构性标记：原文
    /// - 其他：译文
    pub fn column_for(&self, path: &str) -> Column {
        if !path.contains(PATH_SEPARATOR) {
            return Column::Translated;
        }
        if self.is_structural(path) {
            Column::Raw
        } else {
            Column::Translated
        }
    }

    /// 为导入行选出要写回的值
    ///
    /// # 返回
    /// - `Ok((列, 值))`: 需要回写
    /// - `Err(原因)`: 该行不回写
    pub fn select<'a>(&self, line: &'a ImportLine) -> Result<(Column, &'a str), SkipReason> {
        if is_header(&line.path) {
            return Err(SkipReason::Header);
        }
        if line.path.is_empty() {
            return Err(SkipReason::EmptyPath);
        }
        let column = self.column_for(&line.path);
        let value = match column {
            Column::Raw => line.raw.as_str(),
            Column::Translated => line.translated.as_str(),
        };
        Ok((column, value))
    }
}

/// 是否为表头行
pub fn is_header(path: &str) -> bool {
    path == HEADER_HANDLE
}
