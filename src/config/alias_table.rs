// ==========================================
// 酒店后台 - 列名别名表
// ==========================================
// 职责: 规范字段 → 有序别名列表（跨语言/跨渠道导出格式）
// 红线: 别名表是数据，不是逻辑；新增渠道格式只需追加别名
// ==========================================

use crate::domain::CanonicalField;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

/// 列名别名表
///
/// 别名顺序即优先级：同一行同时出现多个别名列时，靠前的别名胜出。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    fields: BTreeMap<CanonicalField, Vec<String>>,
}

impl Default for AliasTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.set(
            CanonicalField::GuestName,
            ["اسم الضيف/الضيوف", "اسم الضيف", "Guest Name"],
        );
        table.set(CanonicalField::CheckIn, ["تسجيل الوصول", "Check In"]);
        table.set(CanonicalField::CheckOut, ["تسجيل المغادرة", "Check Out"]);
        table.set(CanonicalField::RoomLabel, ["نوع الوحدة", "Room"]);
        table.set(
            CanonicalField::Price,
            ["السعر", "Your Revenue", "Taxable Revenue"],
        );
        table.set(CanonicalField::Currency, ["العملة", "Currency"]);
        table
    }
}

impl AliasTable {
    /// 空表（所有字段无别名）
    pub fn empty() -> Self {
        Self {
            fields: BTreeMap::new(),
        }
    }

    /// 从 JSON 文本解析
    ///
    /// 格式: `{"guest_name": ["Guest Name", ...], "price": [...]}`，
    /// 未出现的字段视为无别名。
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// 从 JSON 文件加载
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(Self::from_json_str(&raw)?)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 设置某字段的别名列表（整体替换）
    pub fn set<I, S>(&mut self, field: CanonicalField, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .insert(field, aliases.into_iter().map(Into::into).collect());
    }

    /// 在末尾追加别名（优先级最低），已存在则忽略
    pub fn push_alias(&mut self, field: CanonicalField, alias: impl Into<String>) {
        let alias = alias.into();
        let list = self.fields.entry(field).or_default();
        if !list.contains(&alias) {
            list.push(alias);
        }
    }

    /// 某字段的有序别名
    pub fn aliases(&self, field: CanonicalField) -> &[String] {
        self.fields.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 用覆写表中出现的字段替换本表对应字段
    pub fn merge_overrides(&mut self, overrides: AliasTable) {
        for (field, aliases) in overrides.fields {
            self.fields.insert(field, aliases);
        }
    }

    /// 没有任何别名的字段（这些字段永远回填默认值）
    pub fn unmapped_fields(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|f| self.aliases(*f).is_empty())
            .collect()
    }
}
