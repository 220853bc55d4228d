// ==========================================
// 酒店后台 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CanonicalField - 规范字段
// ==========================================
// 用途: 导入管道需要填充的 6 个逻辑字段
// 说明: 每个字段对应一组有序别名（见 config::AliasTable）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    GuestName,
    CheckIn,
    CheckOut,
    RoomLabel,
    Price,
    Currency,
}

impl CanonicalField {
    /// 全部字段（固定顺序）
    pub const ALL: [CanonicalField; 6] = [
        CanonicalField::GuestName,
        CanonicalField::CheckIn,
        CanonicalField::CheckOut,
        CanonicalField::RoomLabel,
        CanonicalField::Price,
        CanonicalField::Currency,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::GuestName => "guest_name",
            CanonicalField::CheckIn => "check_in",
            CanonicalField::CheckOut => "check_out",
            CanonicalField::RoomLabel => "room_label",
            CanonicalField::Price => "price",
            CanonicalField::Currency => "currency",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// FileFormat - 上传文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    Csv,
    Xls,
    Xlsx,
}

impl FileFormat {
    /// 根据扩展名识别格式（大小写不敏感，可带前导点）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "csv" => Some(FileFormat::Csv),
            "xls" => Some(FileFormat::Xls),
            "xlsx" => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    pub fn is_spreadsheet(&self) -> bool {
        matches!(self, FileFormat::Xls | FileFormat::Xlsx)
    }
}
