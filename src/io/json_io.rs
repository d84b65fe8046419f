/// JSON IO 实现
///
/// 元素与文档均以 JSON 存储
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json::Value;

use super::traits::{DocumentReader, DocumentWriter, ElementReader};
use crate::document::{document_from_value, Document};
use crate::element::Element;
use crate::utils::SheetError;

/// 默认的元素读取器
#[derive(Debug, Clone, Default)]
pub struct DefaultElementReader;

impl ElementReader for DefaultElementReader {
    fn read(&self, path: &Path) -> Result<Element, SheetError> {
        let rdr = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(rdr)?)
    }
}

/// 默认的文档读取器，顶层必须是对象
#[derive(Debug, Clone, Default)]
pub struct DefaultDocumentReader;

impl DocumentReader for DefaultDocumentReader {
    fn read(&self, path: &Path) -> Result<Document, SheetError> {
        let rdr = BufReader::new(File::open(path)?);
        let value: Value = serde_json::from_reader(rdr)?;
        document_from_value(value)
    }
}

/// 默认的文档写入器（格式化输出）
#[derive(Debug, Clone, Default)]
pub struct DefaultDocumentWriter;

impl DocumentWriter for DefaultDocumentWriter {
    fn write(&self, doc: &Document, path: &Path) -> Result<(), SheetError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let f = File::create(path)?;
        serde_json::to_writer_pretty(f, doc)?;
        Ok(())
    }
}
