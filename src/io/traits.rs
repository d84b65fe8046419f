/// IO 抽象层 - trait 定义
///
/// 该模块定义了文件读写的抽象接口，支持依赖注入和测试 mock。

use std::path::Path;

use crate::document::Document;
use crate::element::Element;
use crate::sheet::{FlatRow, ImportLine};
use crate::utils::SheetError;

/// 表格读取 trait
///
/// # 职责
/// - 读取交付的三列表格，表头原样保留
pub trait SheetReader {
    /// 读取表格
    ///
    /// # 参数
    /// * `path` - 表格文件路径
    fn read(&self, path: &Path) -> Result<Vec<ImportLine>, SheetError>;
}

/// 表格写入 trait
///
/// # 职责
/// - 写出表头与导出行
pub trait SheetWriter {
    /// 写入表格
    ///
    /// # 参数
    /// * `rows` - 导出行
    /// * `path` - 目标文件路径
    fn write(&self, rows: &[FlatRow], path: &Path) -> Result<(), SheetError>;
}

/// 元素读取 trait
pub trait ElementReader {
    fn read(&self, path: &Path) -> Result<Element, SheetError>;
}

/// 文档读取 trait
pub trait DocumentReader {
    fn read(&self, path: &Path) -> Result<Document, SheetError>;
}

/// 文档写入 trait
pub trait DocumentWriter {
    fn write(&self, doc: &Document, path: &Path) -> Result<(), SheetError>;
}
