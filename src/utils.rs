use thiserror::Error;
use std::path::Path;

/// 自定义错误类型
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Unknown field kind: {0}")]
    UnknownFieldKind(String),

    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// 导出时的原文清理：每个 `\r`、`\n` 各替换为一个空格，不再进一步合并
pub fn normalize_line_breaks(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// 统计单词数
///
/// 单词为连续的 ASCII 字母、`'`、`-`，且必须以字母开头
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;

    for c in text.chars() {
        if c.is_ascii_alphabetic() {
            if !in_word {
                count += 1;
                in_word = true;
            }
        } else if in_word && (c == '\'' || c == '-') {
            // 单词内部允许出现
        } else {
            in_word = false;
        }
    }

    count
}

/// 创建文件备份
pub fn create_backup(file_path: &Path) -> Result<std::path::PathBuf, SheetError> {
    if !file_path.exists() {
        return Err(SheetError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "原文件不存在"
        )));
    }

    let timestamp = chrono::Local::now().format("%Y-%m-%d-%H-%M-%S");
    let backup_path = file_path.with_extension(format!("{}.bak", timestamp));

    std::fs::copy(file_path, &backup_path)
        .map_err(SheetError::IoError)?;

    Ok(backup_path)
}
