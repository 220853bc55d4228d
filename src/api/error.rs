// ==========================================
// 酒店后台 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，把导入/仓储错误转换为可展示的错误消息
// ==========================================

use crate::i18n::t_with_args;
use crate::importer::error::{ImportError, ImportErrorKind};
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 文件级导入错误（库中数据不变）
    // ==========================================
    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    ReadFailure(String),

    // ==========================================
    // 业务输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ApiError {
    /// 当前语言下面向用户的错误消息
    pub fn localized_message(&self) -> String {
        match self {
            ApiError::UnsupportedFormat(_) => crate::i18n::t("import.unsupported_format"),
            ApiError::ReadFailure(msg) => t_with_args("import.read_failure", &[("error", msg)]),
            ApiError::DatabaseError(msg)
            | ApiError::DatabaseConnectionError(msg)
            | ApiError::DatabaseTransactionError(msg) => {
                t_with_args("import.storage_failure", &[("error", msg)])
            }
            other => t_with_args("import.failed", &[("error", &other.to_string())]),
        }
    }
}

// ==========================================
// 从 ImportError 转换（按错误分类）
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err.kind() {
            ImportErrorKind::UnsupportedFormat => ApiError::UnsupportedFormat(err.to_string()),
            ImportErrorKind::ReadFailure => ApiError::ReadFailure(err.to_string()),
            ImportErrorKind::Storage => ApiError::DatabaseTransactionError(err.to_string()),
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::UniqueConstraintViolation(msg)
            | RepositoryError::ForeignKeyViolation(msg)
            | RepositoryError::CheckConstraintViolation(msg) => ApiError::DatabaseError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
