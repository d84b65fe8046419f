//! 导出流程：元素 -> 文档 -> 扁平行 -> CSV 文件

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde_json::Value;

use crate::config::Settings;
use crate::document::Document;
use crate::element::Element;
use crate::fields::DecoratorRegistry;
use crate::io::SheetWriter;
use crate::sheet::{export_rows, FlatRow};
use crate::utils::SheetError;

/// 导出文件名前缀
pub const EXPORT_FILE_PREFIX: &str = "translated_autogenerated_";

/// 单个元素的导出结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutcome {
    /// 写出的表格路径
    pub path: PathBuf,
    /// 数据行数（不含表头）
    pub rows: usize,
}

/// 构造导出用文档：字段 + `title`，开启时再加 `slug`
pub fn prepare_document(
    element: &Element,
    registry: &DecoratorRegistry,
    settings: &Settings,
) -> Document {
    let mut doc = registry.decorate_element(element);
    doc.insert("title".to_string(), Value::String(element.title.clone()));
    if settings.translate_slugs {
        doc.insert("slug".to_string(), Value::String(element.slug.clone()));
    }
    doc
}

/// 元素 -> 导出行
pub fn element_rows(
    element: &Element,
    registry: &DecoratorRegistry,
    settings: &Settings,
) -> Vec<FlatRow> {
    export_rows(&prepare_document(element, registry, settings))
}

/// 导出文件名：`translated_autogenerated_<slug>_<unix 时间戳>.csv`
pub fn export_file_name(slug: &str, timestamp: i64) -> String {
    let slug: String = slug
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect();
    format!("{}{}_{}.csv", EXPORT_FILE_PREFIX, slug, timestamp)
}

/// 在目录中占用一个不冲突的文件名（重名时追加 `_1`, `_2`…）
fn claim_path(dir: &Path, file_name: &str) -> Result<PathBuf, SheetError> {
    std::fs::create_dir_all(dir)?;
    let (stem, extension) = file_name.rsplit_once('.').unwrap_or((file_name, ""));

    let mut attempt = 0usize;
    loop {
        let candidate = if attempt == 0 {
            dir.join(file_name)
        } else {
            dir.join(format!("{}_{}.{}", stem, attempt, extension))
        };
        match OpenOptions::new().write(true).create_new(true).open(&candidate) {
            Ok(_) => return Ok(candidate),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => attempt += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

/// 导出单个元素到 `dir`
pub fn export_element<W: SheetWriter + ?Sized>(
    element: &Element,
    registry: &DecoratorRegistry,
    settings: &Settings,
    writer: &W,
    dir: &Path,
) -> Result<ExportOutcome, SheetError> {
    let rows = element_rows(element, registry, settings);
    let file_name = export_file_name(&element.slug, chrono::Utc::now().timestamp());
    let path = claim_path(dir, &file_name)?;

    // 写入失败时不留下空文件
    if let Err(e) = writer.write(&rows, &path) {
        if let Err(cleanup) = std::fs::remove_file(&path) {
            tracing::warn!(
                path = %path.display(),
                error = %cleanup,
                "failed to remove claimed file"
            );
        }
        return Err(e);
    }
    tracing::info!(path = %path.display(), rows = rows.len(), "element exported");

    Ok(ExportOutcome { path, rows: rows.len() })
}

/// 并行导出多个元素，结果顺序与输入一致
pub fn export_batch<W: SheetWriter + Sync + ?Sized>(
    elements: &[Element],
    registry: &DecoratorRegistry,
    settings: &Settings,
    writer: &W,
    dir: &Path,
) -> Vec<Result<ExportOutcome, SheetError>> {
    elements
        .par_iter()
        .map(|element| export_element(element, registry, settings, writer, dir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::FieldValue;
    use crate::io::{DefaultSheetReader, DefaultSheetWriter, SheetReader};
    use serde_json::json;
    use tempfile::TempDir;

    fn create_test_element(slug: &str) -> Element {
        Element {
            id: Some(1),
            title: "Hello".to_string(),
            slug: slug.to_string(),
            fields: vec![
                FieldValue::new("intro", "plain_text", true, json!("First line\nsecond line")),
                FieldValue::new(
                    "blocks",
                    "matrix",
                    false,
                    json!({
                        "0": { "type": "text", "enabled": "1", "fields": { "text": "Block" } }
                    }),
                ),
            ],
        }
    }

    #[test]
    fn test_prepare_document_respects_translate_slugs() {
        let registry = DecoratorRegistry::from_embedded_data().unwrap();
        let element = create_test_element("hello");

        let doc = prepare_document(&element, &registry, &Settings::default());
        let keys: Vec<&str> = doc.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["intro", "blocks", "title"]);

        let settings = Settings { translate_slugs: true, ..Settings::default() };
        let doc = prepare_document(&element, &registry, &settings);
        assert_eq!(doc["slug"], "hello");
    }

    #[test]
    fn test_element_rows() {
        let registry = DecoratorRegistry::from_embedded_data().unwrap();
        let rows = element_rows(&create_test_element("hello"), &registry, &Settings::default());

        let paths: Vec<&str> = rows.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["intro", "blocks.0.enabled", "blocks.0.fields.text", "title"]
        );
        assert_eq!(rows[0].raw, "First line second line");
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name("about-us", 1700000000),
            "translated_autogenerated_about-us_1700000000.csv"
        );
        assert_eq!(export_file_name("a/b c", 1), "translated_autogenerated_a-b-c_1.csv");
    }

    #[test]
    fn test_claim_path_avoids_conflicts() {
        let temp_dir = TempDir::new().unwrap();

        let first = claim_path(temp_dir.path(), "sheet.csv").unwrap();
        let second = claim_path(temp_dir.path(), "sheet.csv").unwrap();

        assert_eq!(first, temp_dir.path().join("sheet.csv"));
        assert_eq!(second, temp_dir.path().join("sheet_1.csv"));
    }

    #[test]
    fn test_export_element() {
        let temp_dir = TempDir::new().unwrap();
        let registry = DecoratorRegistry::from_embedded_data().unwrap();

        let outcome = export_element(
            &create_test_element("hello"),
            &registry,
            &Settings::default(),
            &DefaultSheetWriter,
            temp_dir.path(),
        )
        .unwrap();

        assert_eq!(outcome.rows, 4);
        let name = outcome.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("translated_autogenerated_hello_"));

        let lines = DefaultSheetReader.read(&outcome.path).unwrap();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].path, "HANDLE");
    }

    struct FailingWriter;

    impl SheetWriter for FailingWriter {
        fn write(&self, _rows: &[FlatRow], _path: &Path) -> Result<(), SheetError> {
            Err(SheetError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "disk full",
            )))
        }
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let registry = DecoratorRegistry::from_embedded_data().unwrap();

        let result = export_element(
            &create_test_element("hello"),
            &registry,
            &Settings::default(),
            &FailingWriter,
            temp_dir.path(),
        );

        assert!(matches!(result, Err(SheetError::IoError(_))));
        assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_export_batch_same_slug() {
        let temp_dir = TempDir::new().unwrap();
        let registry = DecoratorRegistry::from_embedded_data().unwrap();
        let elements: Vec<Element> = (0..4).map(|_| create_test_element("same")).collect();

        let outcomes = export_batch(
            &elements,
            &registry,
            &Settings::default(),
            &DefaultSheetWriter,
            temp_dir.path(),
        );

        let mut paths: Vec<PathBuf> = outcomes.into_iter().map(|o| o.unwrap().path).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), 4);
    }
}
