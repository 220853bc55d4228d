// ==========================================
// 酒店后台 - 数据清洗器实现
// ==========================================
// 职责: 金额文本 → 数值 / 客人姓名占位判定
// 约束: 清洗是建议性的，永不阻断一行的导入
// ==========================================

use crate::domain::UNKNOWN_GUEST;
use crate::importer::reservation_importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    /// 金额清洗
    ///
    /// 1. 删除数字、`.`、`,` 以外的所有字符
    /// 2. `,` 一律视为千分位，直接删除
    /// 3. 解析为浮点数；空串/无法解析/非有限值 → 0.0
    fn sanitize_price(&self, raw: &str) -> f64 {
        let kept: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();

        if kept.is_empty() {
            return 0.0;
        }

        match kept.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// "nan" 不区分大小写（NaN / NAN 同样是表格软件导出的空值），
    /// 且不会作为真实姓名落库
    fn is_placeholder_guest(&self, value: &str) -> bool {
        let v = value.trim();
        v.is_empty() || v.eq_ignore_ascii_case("nan") || v == UNKNOWN_GUEST
    }
}
