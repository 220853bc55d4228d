// ==========================================
// 酒店后台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 文件级错误（UnsupportedFormat / ReadFailure）在任何写库前中止导入；
//       行级错误见 row_failure.rs，不中止批次
// ==========================================

use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 格式错误 =====
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    // ===== 读取错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件过大: {path}（{size} 字节，上限 {max_size} 字节）")]
    FileTooLarge { path: String, size: u64, max_size: u64 },

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("文件缺少表头行: {0}")]
    MissingHeader(String),

    // ===== 数据库错误 =====
    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),
}

/// 错误分类（供调用方决定提示方式）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImportErrorKind {
    UnsupportedFormat,
    ReadFailure,
    Storage,
}

impl ImportError {
    pub fn kind(&self) -> ImportErrorKind {
        match self {
            ImportError::UnsupportedFormat(_) => ImportErrorKind::UnsupportedFormat,
            ImportError::FileNotFound(_)
            | ImportError::FileTooLarge { .. }
            | ImportError::FileReadError(_)
            | ImportError::ExcelParseError(_)
            | ImportError::CsvParseError(_)
            | ImportError::MissingHeader(_) => ImportErrorKind::ReadFailure,
            ImportError::DatabaseTransactionError(_) => ImportErrorKind::Storage,
        }
    }

    /// 是否为文件级读取失败
    pub fn is_read_failure(&self) -> bool {
        self.kind() == ImportErrorKind::ReadFailure
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ImportError {
    fn from(err: rusqlite::Error) -> Self {
        ImportError::DatabaseTransactionError(err.to_string())
    }
}

// 实现 From<RepositoryError>
impl From<RepositoryError> for ImportError {
    fn from(err: RepositoryError) -> Self {
        ImportError::DatabaseTransactionError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            ImportError::UnsupportedFormat("txt".into()).kind(),
            ImportErrorKind::UnsupportedFormat
        );
        assert!(ImportError::FileNotFound("a.csv".into()).is_read_failure());
        assert!(ImportError::ExcelParseError("bad zip".into()).is_read_failure());
        assert!(ImportError::MissingHeader("a.csv".into()).is_read_failure());
        assert_eq!(
            ImportError::DatabaseTransactionError("locked".into()).kind(),
            ImportErrorKind::Storage
        );
    }

    #[test]
    fn test_io_error_maps_to_read_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: ImportError = io.into();
        assert!(err.is_read_failure());
    }
}
