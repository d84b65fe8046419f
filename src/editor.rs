/// 编辑器层模块
///
/// 该模块提供有状态的回写接口：逐行应用交付表格，并追踪每一次回写。
/// 所有修改仅在内存中进行，保存由调用方显式完成。
///
/// # 架构设计
///
/// - **document_editor**: 文档编辑器，持有文档与列选择策略
/// - **delta**: 回写记录与导入报告
///
/// # 使用示例
///
/// ```rust,ignore
/// use translated_sheet::{DocumentEditor, ColumnPolicy};
///
/// let mut editor = DocumentEditor::new(original, ColumnPolicy::default());
/// editor.apply_lines(&lines);
/// println!("{}", editor.report().summary());
///
/// let (document, report) = editor.finish();
/// ```
pub mod delta;
pub mod document_editor;

// === 导出公共接口 ===
pub use delta::{ImportChange, ImportReport};
pub use document_editor::DocumentEditor;
