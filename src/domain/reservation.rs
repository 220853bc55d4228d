// ==========================================
// 酒店后台 - 预订领域模型
// ==========================================
// 职责: 定义导入管道的输出实体与批次汇总
// 红线: 导入预订是可丢弃快照，与正式 Booking 实体无关
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 客人姓名未解析时的占位值
pub const UNKNOWN_GUEST: &str = "غير معروف";

/// 房间未解析时的占位值
pub const UNSPECIFIED_ROOM: &str = "غير محددة";

/// 币种未解析时的默认值
pub const DEFAULT_CURRENCY: &str = "USD";

// ==========================================
// ReservationRecord - 规范化预订记录
// ==========================================
// 用途: 导入层生成，整表替换写入 reservation 表
// 约束: guest_name / room / currency 非空，price 为有限非负数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub guest_name: String,
    pub check_in: String,  // 原始日期文本，不做格式校验
    pub check_out: String, // 原始日期文本，不做格式校验
    pub room: String,
    pub price: f64,
    pub currency: String,
}

impl ReservationRecord {
    /// 按默认值回填缺失字段后构造记录
    pub fn with_defaults(
        guest_name: &str,
        check_in: &str,
        check_out: &str,
        room: &str,
        price: f64,
        currency: &str,
    ) -> Self {
        Self {
            guest_name: non_empty_or(guest_name, UNKNOWN_GUEST),
            check_in: check_in.to_string(),
            check_out: check_out.to_string(),
            room: non_empty_or(room, UNSPECIFIED_ROOM),
            price: if price.is_finite() && price >= 0.0 { price } else { 0.0 },
            currency: non_empty_or(currency, DEFAULT_CURRENCY),
        }
    }
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

// ==========================================
// StoredReservation - 已落库预订（带自增 ID）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReservation {
    pub id: i64,
    #[serde(flatten)]
    pub record: ReservationRecord,
}

// ==========================================
// ImportBatch - 导入批次
// ==========================================
// 对齐: import_batch 表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,
    pub file_name: Option<String>,
    pub encoding: Option<String>,
    pub total_rows: usize,
    pub imported_rows: usize,
    pub skipped_rows: usize,
    pub failed_rows: usize,
    pub detected_headers: Vec<String>,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

// ==========================================
// RowFailureLog - 行级失败日志
// ==========================================
// 对齐: import_row_failure 表
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowFailureLog {
    pub row_number: usize,
    pub reason: String,
}

// ==========================================
// ImportSummary - 导入汇总（返回给调用方）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize, // 解码后的非空行数
    pub imported: usize,   // 落库行数
    pub skipped: usize,    // 准入规则排除
    pub failed: usize,     // 行级失败
}
