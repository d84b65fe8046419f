/// 文档编辑器模块
///
/// 按列选择策略把导入行逐条回写到文档中。

use serde_json::Value;

use super::delta::{ImportChange, ImportReport};
use crate::document::Document;
use crate::merge::merge;
use crate::selection::ColumnPolicy;
use crate::sheet::ImportLine;

/// 文档编辑器 - 管理回写状态
///
/// # 核心特性
/// - **Stateful**: 可多次应用导入行后统一取出结果
/// - **可追踪**: 每次回写都记录在 [`ImportReport`] 中
/// - **隔离性**: 每个编辑器独占自己的文档
#[derive(Debug, Clone)]
pub struct DocumentEditor {
    /// 被回写的文档
    document: Document,
    /// 列选择策略
    policy: ColumnPolicy,
    /// 回写记录
    report: ImportReport,
}

impl DocumentEditor {
    /// 创建新的文档编辑器
    ///
    /// # 参数
    /// * `document` - 原始文档
    /// * `policy` - 列选择策略
    pub fn new(document: Document, policy: ColumnPolicy) -> Self {
        Self {
            document,
            policy,
            report: ImportReport::new(),
        }
    }

    /// 应用单个导入行
    ///
    /// # 返回
    /// 回写了返回 true，表头或空路径行返回 false
    pub fn apply_line(&mut self, line: &ImportLine) -> bool {
        let (column, value) = match self.policy.select(line) {
            Ok(selected) => selected,
            Err(reason) => {
                tracing::debug!(path = %line.path, ?reason, "import line skipped");
                self.report.add_skipped(reason);
                return false;
            }
        };

        let outcome = merge(&mut self.document, &line.path, Value::String(value.to_string()));
        self.report.add_displaced(outcome.displaced);
        self.report.add_change(ImportChange {
            path: line.path.clone(),
            column,
            previous: outcome.previous,
            value: value.to_string(),
        });
        true
    }

    /// 批量应用导入行
    ///
    /// # 返回
    /// 实际回写的行数
    pub fn apply_lines<'a, I>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = &'a ImportLine>,
    {
        lines.into_iter().filter(|line| self.apply_line(line)).count()
    }

    /// 获取当前文档
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// 获取回写记录
    pub fn report(&self) -> &ImportReport {
        &self.report
    }

    /// 结束编辑，取出文档与报告
    pub fn finish(self) -> (Document, ImportReport) {
        (self.document, self.report)
    }
}
