// ==========================================
// 酒店后台 - 解码结果
// ==========================================
// RawRow: 原始表头 → 单元格文本（保持列顺序）
// DecodedTable: 表头 + 逐行结果（行级失败随行携带）
// ==========================================

use crate::importer::row_failure::RowFailure;

/// 原始行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    row_number: usize,
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(row_number: usize, cells: Vec<(String, String)>) -> Self {
        Self { row_number, cells }
    }

    /// 由表头与单元格构造；单元格不足时以空串补齐
    pub fn from_headers(row_number: usize, headers: &[String], values: Vec<String>) -> Self {
        let mut values = values.into_iter();
        let cells = headers
            .iter()
            .map(|h| (h.clone(), values.next().unwrap_or_default()))
            .collect();
        Self { row_number, cells }
    }

    /// 数据行号（从 1 开始，不含表头）
    pub fn row_number(&self) -> usize {
        self.row_number
    }

    pub fn cells(&self) -> &[(String, String)] {
        &self.cells
    }

    /// 按原始表头取值（首个匹配）
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// 是否整行空白
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.trim().is_empty())
    }
}

/// 解码后的表格
#[derive(Debug, Clone, Default)]
pub struct DecodedTable {
    /// 文件中的原始表头（按列顺序）
    pub headers: Vec<String>,

    /// 探测到的字符集（仅 CSV）
    pub encoding: Option<String>,

    /// 非空行（成功解码的行或行级失败）
    pub rows: Vec<Result<RawRow, RowFailure>>,
}

impl DecodedTable {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}
