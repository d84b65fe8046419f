/// 导入变更追踪模块
///
/// 记录导入过程中对文档的每一次回写，便于审计和输出摘要。

use serde_json::Value;

use crate::document::scalar_text;
use crate::selection::{Column, SkipReason};

/// 导入报告
///
/// # 实现细节
/// - 所有回写按表格行顺序存储在 changes 中
/// - 跳过的行只计数，不保留内容
/// - 标量被容器覆盖的路径单独收集，供调用方提示
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    /// 所有回写记录
    changes: Vec<ImportChange>,
    /// 跳过的表头行数
    skipped_headers: usize,
    /// 跳过的空路径行数
    skipped_empty: usize,
    /// 被容器覆盖掉的标量路径
    displaced: Vec<String>,
}

/// 单行回写
#[derive(Debug, Clone, PartialEq)]
pub struct ImportChange {
    /// 叶子路径
    pub path: String,
    /// 取值所用的列
    pub column: Column,
    /// 回写前的值（新建时为 None）
    pub previous: Option<Value>,
    /// 回写的值
    pub value: String,
}

impl ImportChange {
    /// 回写前后是否不同
    pub fn is_modification(&self) -> bool {
        match &self.previous {
            Some(Value::String(previous)) => previous != &self.value,
            // 回写值总是字符串，原值为其他类型即视为修改
            Some(_) | None => true,
        }
    }
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加一条回写记录
    pub fn add_change(&mut self, change: ImportChange) {
        self.changes.push(change);
    }

    /// 记录跳过的行
    pub fn add_skipped(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::Header => self.skipped_headers += 1,
            SkipReason::EmptyPath => self.skipped_empty += 1,
        }
    }

    /// 记录被覆盖的标量路径
    pub fn add_displaced(&mut self, paths: impl IntoIterator<Item = String>) {
        self.displaced.extend(paths);
    }

    /// 回写行数
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImportChange> {
        self.changes.iter()
    }

    /// 值确实发生变化的回写
    pub fn modifications(&self) -> impl Iterator<Item = &ImportChange> {
        self.changes.iter().filter(|c| c.is_modification())
    }

    /// 取原文列的回写数（结构性标记）
    pub fn raw_column_count(&self) -> usize {
        self.changes.iter().filter(|c| c.column == Column::Raw).count()
    }

    pub fn skipped_headers(&self) -> usize {
        self.skipped_headers
    }

    pub fn skipped_empty(&self) -> usize {
        self.skipped_empty
    }

    pub fn displaced(&self) -> &[String] {
        &self.displaced
    }

    /// 获取某路径的全部回写
    pub fn get_changes_for_path(&self, path: &str) -> Vec<&ImportChange> {
        self.iter().filter(|change| change.path == path).collect()
    }

    /// 生成变更摘要
    pub fn summary(&self) -> String {
        format!(
            "回写总数: {}, 实际修改: {}, 保留原文: {}, 跳过表头: {}, 跳过空行: {}, 覆盖标量: {}",
            self.changes.len(),
            self.modifications().count(),
            self.raw_column_count(),
            self.skipped_headers,
            self.skipped_empty,
            self.displaced.len()
        )
    }
}

fn truncate(text: &str) -> String {
    if text.chars().count() > 30 {
        format!("{}...", text.chars().take(30).collect::<String>())
    } else {
        text.to_string()
    }
}

impl std::fmt::Display for ImportChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let previous = self.previous.as_ref().map(scalar_text).unwrap_or_default();
        write!(
            f,
            "[{}] {}: \"{}\" -> \"{}\"",
            self.column,
            self.path,
            truncate(&previous),
            truncate(&self.value)
        )
    }
}
