/// IO 抽象层模块
///
/// 该模块提供了文件读写的抽象接口，导出/导入流程只依赖 trait，
/// 便于测试时替换为内存实现。
///
/// # 架构设计
///
/// - **traits**: 定义 Reader/Writer trait 接口
/// - **sheet_io**: CSV 表格的默认实现
/// - **json_io**: 元素与文档 JSON 的默认实现
///
/// # 使用示例
///
/// ```rust,ignore
/// use translated_sheet::io::{DefaultSheetReader, SheetReader};
///
/// let reader = DefaultSheetReader;
/// let lines = reader.read(Path::new("delivered.csv"))?;
/// ```
pub mod traits;
pub mod sheet_io;
pub mod json_io;

// === 导出 trait 定义 ===
pub use traits::{DocumentReader, DocumentWriter, ElementReader, SheetReader, SheetWriter};

// === 导出默认实现 ===
pub use json_io::{DefaultDocumentReader, DefaultDocumentWriter, DefaultElementReader};
pub use sheet_io::{DefaultSheetReader, DefaultSheetWriter};
