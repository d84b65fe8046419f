/// 表格 IO 实现
///
/// 提供基于文件系统的默认 CSV 表格读写实现
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::traits::{SheetReader, SheetWriter};
use crate::sheet::{read_sheet, write_sheet, FlatRow, ImportLine};
use crate::utils::SheetError;

/// 默认的表格读取器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultSheetReader;

impl SheetReader for DefaultSheetReader {
    fn read(&self, path: &Path) -> Result<Vec<ImportLine>, SheetError> {
        let file = File::open(path)?;
        read_sheet(BufReader::new(file))
    }
}

/// 默认的表格写入器（基于 std::fs）
#[derive(Debug, Clone, Default)]
pub struct DefaultSheetWriter;

impl SheetWriter for DefaultSheetWriter {
    fn write(&self, rows: &[FlatRow], path: &Path) -> Result<(), SheetError> {
        // 确保父目录存在
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(path)?;
        write_sheet(rows, file)
    }
}
