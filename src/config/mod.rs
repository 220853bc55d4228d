// ==========================================
// 酒店后台 - 配置层
// ==========================================
// 职责: 别名表 / 导入管道配置 / config_kv 覆写
// 存储: config_kv 表
// ==========================================

pub mod alias_table;
pub mod config_manager;
pub mod pipeline_config;

// 重导出核心配置类型
pub use alias_table::AliasTable;
pub use config_manager::{config_keys, ConfigManager};
pub use pipeline_config::{default_db_path, ImportPipelineConfig, DEFAULT_MAX_FILE_BYTES};
