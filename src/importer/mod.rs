// ==========================================
// 酒店后台 - 导入层
// ==========================================
// 职责: 外部预订文件导入，整表替换预订数据
// 支持: CSV（自动探测字符集）, XLS, XLSX
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod encoding_detector;
pub mod error;
pub mod field_resolver;
pub mod file_parser;
pub mod header_normalizer;
pub mod raw_row;
pub mod reservation_importer_impl;
pub mod reservation_importer_trait;
pub mod row_failure;
pub mod row_validator;
pub mod upload;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use encoding_detector::{detect_encoding, DetectedEncoding, DetectionSource};
pub use error::{ImportError, ImportErrorKind, ImportResult};
pub use field_resolver::{FieldResolver as FieldResolverImpl, ResolvedFields};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use header_normalizer::{find_header_collisions, normalize_header, normalize_row, NormalizedRow};
pub use raw_row::{DecodedTable, RawRow};
pub use reservation_importer_impl::ReservationImporterImpl;
pub use row_failure::{RowFailure, RowFailureReason};
pub use row_validator::{RowAccumulation, RowOutcome, RowValidator};
pub use upload::{stage_upload, StagedUpload};

// 重导出 Trait 接口
pub use reservation_importer_trait::{
    DataCleaner, FieldResolver, FileParser, ImportReport, ReservationImporter,
};
