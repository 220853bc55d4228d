// ==========================================
// 酒店后台 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含数据访问逻辑,不含导入逻辑
// ==========================================

pub mod reservation;
pub mod types;

// 重导出核心类型
pub use reservation::{
    ImportBatch, ImportSummary, ReservationRecord, RowFailureLog, StoredReservation, DEFAULT_CURRENCY,
    UNKNOWN_GUEST, UNSPECIFIED_ROOM,
};
pub use types::{CanonicalField, FileFormat};
