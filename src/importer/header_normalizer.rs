// ==========================================
// 酒店后台 - 表头规范化
// ==========================================
// 职责: TRIM + 路径分隔符统一（\ → /）
// 说明: 部分渠道导出的复合列名分隔符不一致
// ==========================================

use crate::importer::raw_row::RawRow;
use std::collections::HashMap;

/// 规范化后的行（规范表头 → 去空白值）
pub type NormalizedRow = HashMap<String, String>;

/// 规范化单个表头
pub fn normalize_header(header: &str) -> String {
    header.trim().replace('\\', "/")
}

/// 规范化整行
///
/// 两个原始表头规范化后相同时，后出现的列覆盖先出现的列。
pub fn normalize_row(row: &RawRow) -> NormalizedRow {
    row.cells()
        .iter()
        .map(|(header, value)| (normalize_header(header), value.trim().to_string()))
        .collect()
}

/// 找出规范化后发生冲突的表头
///
/// 返回值中每一项为冲突的规范表头；同一文件只需检查一次。
pub fn find_header_collisions(headers: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut collisions = Vec::new();

    for header in headers {
        let key = normalize_header(header);
        let count = seen.entry(key.clone()).or_insert(0);
        *count += 1;
        if *count == 2 {
            collisions.push(key);
        }
    }

    collisions
}
