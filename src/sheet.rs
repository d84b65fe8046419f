//! 三列表格：HANDLE / RAW / TRANSLATED

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::document::{scalar_text, Document};
use crate::flatten::{flatten, FlatEntry};
use crate::utils::{normalize_line_breaks, SheetError};

/// 表头第一列，导入时以此识别表头行
pub const HEADER_HANDLE: &str = "HANDLE";

/// 完整表头
pub const HEADER: [&str; 3] = [HEADER_HANDLE, "RAW", "TRANSLATED"];

/// 导出行
///
/// - 导出时：`raw` 为原文（换行替换为空格），`translated` 为空
/// - 交付后：`translated` 由翻译方填写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRow {
    /// 叶子路径
    pub path: String,
    /// 原文
    pub raw: String,
    /// 译文
    pub translated: String,
}

impl FlatRow {
    /// 由扁平叶子创建导出行
    pub fn from_entry(entry: &FlatEntry) -> Self {
        Self {
            path: entry.path.clone(),
            raw: normalize_line_breaks(&scalar_text(&entry.value)),
            translated: String::new(),
        }
    }
}

/// 从交付表格读出的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportLine {
    /// A 列：路径
    pub path: String,
    /// B 列：原文
    pub raw: String,
    /// C 列：译文
    pub translated: String,
}

impl ImportLine {
    pub fn new(
        path: impl Into<String>,
        raw: impl Into<String>,
        translated: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            raw: raw.into(),
            translated: translated.into(),
        }
    }
}

impl From<FlatRow> for ImportLine {
    fn from(row: FlatRow) -> Self {
        Self::new(row.path, row.raw, row.translated)
    }
}

/// 文档 -> 导出行（顺序与扁平化顺序一致）
pub fn export_rows(doc: &Document) -> Vec<FlatRow> {
    flatten(doc).iter().map(FlatRow::from_entry).collect()
}

/// 写出表格（含表头）
pub fn write_sheet<W: Write>(rows: &[FlatRow], writer: W) -> Result<(), SheetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;
    for row in rows {
        csv_writer.write_record([row.path.as_str(), row.raw.as_str(), row.translated.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// 读取表格为导入行
///
/// 表头不在此处剔除，按值在列选择时跳过。不足三列的行以空串补齐，
/// 多余的列忽略。
pub fn read_sheet<R: Read>(reader: R) -> Result<Vec<ImportLine>, SheetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut lines = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let column = |idx: usize| record.get(idx).unwrap_or_default().to_string();
        let mut path = column(0);
        if lines.is_empty() {
            // Excel 导出的 CSV 常带 BOM
            path = path.trim_start_matches('\u{feff}').to_string();
        }
        lines.push(ImportLine::new(path, column(1), column(2)));
    }

    tracing::debug!(count = lines.len(), "sheet lines read");
    Ok(lines)
}
