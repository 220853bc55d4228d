// ==========================================
// 酒店后台 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 预订批量导入管道（CSV / XLS / XLSX → 预订表整表替换）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "ar");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 别名表与管道配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    CanonicalField, FileFormat, ImportBatch, ImportSummary, ReservationRecord, RowFailureLog,
    StoredReservation,
};

// 配置
pub use config::{AliasTable, ConfigManager, ImportPipelineConfig};

// 导入
pub use importer::{ImportError, ImportReport, ReservationImporter, ReservationImporterImpl};

// 仓储
pub use repository::{ReservationRepository, ReservationRepositoryImpl};

// API
pub use api::{ApiError, ImportApi, ImportApiResponse};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "酒店后台";

// 数据库版本
pub const DB_VERSION: &str = "v1";
