pub mod config;
pub mod document;
pub mod editor;
pub mod element;
pub mod export;
pub mod fields;
pub mod flatten;
pub mod import;
pub mod io;
pub mod merge;
pub mod selection;
pub mod sheet;
pub mod utils;

// 重新导出主要结构
pub use config::Settings;
pub use document::{scalar_text, Document};
pub use editor::{DocumentEditor, ImportChange, ImportReport};
pub use element::{Element, FieldValue};
pub use export::{export_batch, export_element, prepare_document, ExportOutcome};
pub use fields::{DecoratorRegistry, FieldDecorator};
pub use flatten::{flatten, FlatEntry};
pub use import::{apply_import_lines, import_element, import_sheet, ImportOutcome};
pub use merge::{merge, merge_all, unflatten, MergeOutcome};
pub use selection::{Column, ColumnPolicy, FlagMatch};
pub use sheet::{FlatRow, ImportLine, HEADER};
pub use utils::SheetError;

// 常量定义
pub const SUPPORTED_EXTENSIONS: &[&str] = &["csv"];
