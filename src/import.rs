//! 导入流程：原始文档 + 交付表格 -> 回写后的文档

use std::path::Path;

use crate::config::Settings;
use crate::document::Document;
use crate::editor::{DocumentEditor, ImportReport};
use crate::element::Element;
use crate::fields::DecoratorRegistry;
use crate::io::SheetReader;
use crate::selection::ColumnPolicy;
use crate::sheet::ImportLine;
use crate::utils::SheetError;

/// 导入结果
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// 回写后的文档
    pub document: Document,
    /// 回写记录
    pub report: ImportReport,
}

/// 把导入行回写到原始文档
pub fn apply_import_lines(
    original: Document,
    lines: &[ImportLine],
    policy: ColumnPolicy,
) -> ImportOutcome {
    let mut editor = DocumentEditor::new(original, policy);
    editor.apply_lines(lines);
    let (document, report) = editor.finish();

    if !report.displaced().is_empty() {
        tracing::warn!(
            count = report.displaced().len(),
            "some scalar values were replaced by containers during import"
        );
    }
    tracing::info!("{}", report.summary());

    ImportOutcome { document, report }
}

/// 读取交付表格并回写
///
/// # 错误
/// 表格无法读取或解析时返回 [`SheetError::ImportFailed`]，不重试
pub fn import_sheet<R: SheetReader + ?Sized>(
    original: Document,
    reader: &R,
    sheet_path: &Path,
    policy: ColumnPolicy,
) -> Result<ImportOutcome, SheetError> {
    let lines = reader
        .read(sheet_path)
        .map_err(|e| SheetError::ImportFailed(format!("{}: {}", sheet_path.display(), e)))?;
    tracing::debug!(path = %sheet_path.display(), lines = lines.len(), "delivered sheet loaded");

    Ok(apply_import_lines(original, &lines, policy))
}

/// 以元素字段为原始文档导入交付表格
pub fn import_element<R: SheetReader + ?Sized>(
    element: &Element,
    registry: &DecoratorRegistry,
    reader: &R,
    sheet_path: &Path,
    settings: &Settings,
) -> Result<ImportOutcome, SheetError> {
    let original = registry.decorate_element(element);
    import_sheet(original, reader, sheet_path, settings.column_policy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::document_from_value;
    use crate::element::FieldValue;
    use crate::io::DefaultSheetReader;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_apply_import_lines() {
        let original = document_from_value(json!({
            "intro": "Hello",
            "blocks": { "0": { "type": "text", "collapsed": "", "text": "Block" } }
        }))
        .unwrap();
        let lines = vec![
            ImportLine::new("HANDLE", "RAW", "TRANSLATED"),
            ImportLine::new("intro", "Hello", "Bonjour"),
            ImportLine::new("blocks.0.collapsed", "", "replié"),
            ImportLine::new("blocks.0.text", "Block", "Bloc"),
            ImportLine::new("title", "Home", "Accueil"),
        ];

        let outcome = apply_import_lines(original, &lines, ColumnPolicy::default());

        assert_eq!(
            serde_json::Value::Object(outcome.document),
            json!({
                "intro": "Bonjour",
                "blocks": { "0": { "type": "text", "collapsed": "", "text": "Bloc" } },
                "title": "Accueil"
            })
        );
        assert_eq!(outcome.report.len(), 4);
        assert_eq!(outcome.report.skipped_headers(), 1);
    }

    #[test]
    fn test_import_sheet_missing_file() {
        let result = import_sheet(
            Document::new(),
            &DefaultSheetReader,
            Path::new("does-not-exist.csv"),
            ColumnPolicy::default(),
        );
        assert!(matches!(result, Err(SheetError::ImportFailed(_))));
    }

    #[test]
    fn test_import_element() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("delivered.csv");
        std::fs::write(
            &sheet,
            concat!(
                "HANDLE,RAW,TRANSLATED\n",
                "intro,Hello,Hallo\n",
                "blocks.0.enabled,1,0\n",
                "title,Home,Startseite\n",
            ),
        )
        .unwrap();

        let element = Element {
            id: Some(3),
            title: "Home".to_string(),
            slug: "home".to_string(),
            fields: vec![
                FieldValue::new("intro", "plain_text", true, json!("Hello")),
                FieldValue::new("blocks", "neo", false, json!({ "0": { "enabled": "1" } })),
            ],
        };
        let registry = DecoratorRegistry::from_embedded_data().unwrap();

        let outcome = import_element(
            &element,
            &registry,
            &DefaultSheetReader,
            &sheet,
            &Settings::default(),
        )
        .unwrap();

        assert_eq!(outcome.document["intro"], "Hallo");
        assert_eq!(outcome.document["blocks"]["0"]["enabled"], "1");
        assert_eq!(outcome.document["title"], "Startseite");
    }
}
