// ==========================================
// 酒店后台 - 导入管道配置
// ==========================================
// 职责: 单次导入调用的显式配置对象（替代全局 app/session 状态）
// 内容: 数据库路径 / 别名表 / 上传暂存目录 / 文件大小上限
// ==========================================

use crate::config::alias_table::AliasTable;
use std::path::PathBuf;

/// 默认上传大小上限（100 MiB）
pub const DEFAULT_MAX_FILE_BYTES: u64 = 100 * 1024 * 1024;

/// 应用数据目录名
pub const APP_DIR_NAME: &str = "hotel-backoffice";

/// 数据库文件名
pub const DB_FILE_NAME: &str = "hotel.db";

/// 导入管道配置
#[derive(Debug, Clone)]
pub struct ImportPipelineConfig {
    /// SQLite 数据库路径
    pub db_path: String,

    /// 上传文件暂存目录
    pub upload_dir: PathBuf,

    /// 列名别名表
    pub aliases: AliasTable,

    /// 单个文件字节数上限
    pub max_file_bytes: u64,
}

impl ImportPipelineConfig {
    /// 使用默认别名表与系统临时目录创建配置
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            upload_dir: std::env::temp_dir().join(APP_DIR_NAME).join("uploads"),
            aliases: AliasTable::default(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    pub fn with_aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn with_upload_dir(mut self, upload_dir: impl Into<PathBuf>) -> Self {
        self.upload_dir = upload_dir.into();
        self
    }

    pub fn with_max_file_bytes(mut self, max_file_bytes: u64) -> Self {
        self.max_file_bytes = max_file_bytes;
        self
    }
}

/// 默认数据库路径
///
/// 优先使用系统本地数据目录（如 `~/.local/share/hotel-backoffice/hotel.db`），
/// 取不到时退回当前目录。
pub fn default_db_path() -> String {
    match dirs::data_local_dir() {
        Some(dir) => dir
            .join(APP_DIR_NAME)
            .join(DB_FILE_NAME)
            .to_string_lossy()
            .to_string(),
        None => DB_FILE_NAME.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = ImportPipelineConfig::new("test.db")
            .with_upload_dir("/tmp/uploads-x")
            .with_max_file_bytes(10);

        assert_eq!(config.db_path, "test.db");
        assert_eq!(config.upload_dir, PathBuf::from("/tmp/uploads-x"));
        assert_eq!(config.max_file_bytes, 10);
        assert_eq!(config.aliases, AliasTable::default());
    }

    #[test]
    fn test_default_db_path_ends_with_file_name() {
        assert!(default_db_path().ends_with(DB_FILE_NAME));
    }
}
