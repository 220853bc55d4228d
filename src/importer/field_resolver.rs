// ==========================================
// 酒店后台 - 字段解析器
// ==========================================
// 职责: 规范化行 → 6 个规范字段的文本值
// 规则: 按别名优先级顺序查找，返回第一个存在且非空的值；
//       只有空串表示“缺失”，"0" 等值视为存在
// ==========================================

use crate::config::AliasTable;
use crate::domain::CanonicalField;
use crate::importer::header_normalizer::{normalize_header, NormalizedRow};
use crate::importer::reservation_importer_trait::FieldResolver as FieldResolverTrait;
use std::collections::HashMap;

/// 一行解析后的字段值（均为 trim 后文本，缺失为空串）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFields {
    pub guest_name: String,
    pub check_in: String,
    pub check_out: String,
    pub room: String,
    pub price: String,
    pub currency: String,
}

pub struct FieldResolver {
    // 别名已按表头规则规范化，保证与行键一致
    aliases: HashMap<CanonicalField, Vec<String>>,
}

impl FieldResolver {
    pub fn new(table: &AliasTable) -> Self {
        let aliases = CanonicalField::ALL
            .into_iter()
            .map(|field| {
                let list = table
                    .aliases(field)
                    .iter()
                    .map(|a| normalize_header(a))
                    .filter(|a| !a.is_empty())
                    .collect();
                (field, list)
            })
            .collect();

        Self { aliases }
    }

    /// 某字段的规范化别名
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.aliases.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl FieldResolverTrait for FieldResolver {
    fn resolve<'a>(&self, row: &'a NormalizedRow, field: CanonicalField) -> &'a str {
        for alias in self.aliases(field) {
            if let Some(value) = row.get(alias) {
                if !value.is_empty() {
                    return value.as_str();
                }
            }
        }
        ""
    }

    fn resolve_all(&self, row: &NormalizedRow) -> ResolvedFields {
        ResolvedFields {
            guest_name: self.resolve(row, CanonicalField::GuestName).to_string(),
            check_in: self.resolve(row, CanonicalField::CheckIn).to_string(),
            check_out: self.resolve(row, CanonicalField::CheckOut).to_string(),
            room: self.resolve(row, CanonicalField::RoomLabel).to_string(),
            price: self.resolve(row, CanonicalField::Price).to_string(),
            currency: self.resolve(row, CanonicalField::Currency).to_string(),
        }
    }

    fn matched_columns(&self, normalized_headers: &[String]) -> Vec<(CanonicalField, String)> {
        CanonicalField::ALL
            .into_iter()
            .filter_map(|field| {
                self.aliases(field)
                    .iter()
                    .find(|alias| normalized_headers.contains(alias))
                    .map(|alias| (field, alias.clone()))
            })
            .collect()
    }
}
