// ==========================================
// 酒店后台 - 行级失败
// ==========================================
// 职责: 单行无法处理时的类型化结果（不中止批次）
// 来源: 解码阶段的结构问题（多余单元格 / Excel 错误单元格 / CSV 记录损坏）
// ==========================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 行级失败原因
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowFailureReason {
    #[error("单元格数量多于表头: 期望 {expected}，实际 {found}")]
    ExtraCells { expected: usize, found: usize },

    #[error("单元格错误 (列 {column}): {detail}")]
    CellError { column: String, detail: String },

    #[error("记录无法读取: {0}")]
    Unreadable(String),
}

/// 行级失败（带数据行号，从 1 开始，不含表头）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("第 {row_number} 行: {reason}")]
pub struct RowFailure {
    pub row_number: usize,
    pub reason: RowFailureReason,
}

impl RowFailure {
    pub fn new(row_number: usize, reason: RowFailureReason) -> Self {
        Self { row_number, reason }
    }
}
