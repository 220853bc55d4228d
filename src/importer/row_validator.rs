// ==========================================
// 酒店后台 - 行校验与累加
// ==========================================
// 流程: 表头规范化 → 字段解析 → 准入判定 → 默认值回填 → 记录
// 准入: 客人姓名为空/"nan"/占位值 且 入住日期为空 → 排除（不计数、不落库）
// 隔离: 行级失败只记录，不影响其它行
// ==========================================

use crate::domain::ReservationRecord;
use crate::importer::header_normalizer::normalize_row;
use crate::importer::raw_row::RawRow;
use crate::importer::reservation_importer_trait::{DataCleaner, FieldResolver};
use crate::importer::row_failure::RowFailure;

/// 单行处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Admitted(ReservationRecord),
    Skipped,
    Failed(RowFailure),
}

/// 累加结果
#[derive(Debug, Clone, Default)]
pub struct RowAccumulation {
    pub records: Vec<ReservationRecord>,
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

impl RowAccumulation {
    pub fn admitted(&self) -> usize {
        self.records.len()
    }

    fn push(mut self, outcome: RowOutcome) -> Self {
        match outcome {
            RowOutcome::Admitted(record) => self.records.push(record),
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Failed(failure) => {
                tracing::warn!(
                    row_number = failure.row_number,
                    reason = %failure.reason,
                    "跳过出错的行"
                );
                self.failures.push(failure);
            }
        }
        self
    }
}

pub struct RowValidator<'a> {
    resolver: &'a dyn FieldResolver,
    cleaner: &'a dyn DataCleaner,
}

impl<'a> RowValidator<'a> {
    pub fn new(resolver: &'a dyn FieldResolver, cleaner: &'a dyn DataCleaner) -> Self {
        Self { resolver, cleaner }
    }

    /// 处理单行
    pub fn evaluate(&self, row: &RawRow) -> RowOutcome {
        let normalized = normalize_row(row);
        let fields = self.resolver.resolve_all(&normalized);

        if self.cleaner.is_placeholder_guest(&fields.guest_name) && fields.check_in.is_empty() {
            return RowOutcome::Skipped;
        }

        // 被接受的行若姓名为任意大小写的 "nan"，改写为未知占位，不保留字面值
        let guest_name = if self.cleaner.is_placeholder_guest(&fields.guest_name) {
            ""
        } else {
            fields.guest_name.as_str()
        };

        RowOutcome::Admitted(ReservationRecord::with_defaults(
            guest_name,
            &fields.check_in,
            &fields.check_out,
            &fields.room,
            self.cleaner.sanitize_price(&fields.price),
            &fields.currency,
        ))
    }

    /// 对解码结果做纯折叠
    pub fn accumulate<I>(&self, rows: I) -> RowAccumulation
    where
        I: IntoIterator<Item = Result<RawRow, RowFailure>>,
    {
        rows.into_iter()
            .map(|row| match row {
                Ok(raw) => self.evaluate(&raw),
                Err(failure) => RowOutcome::Failed(failure),
            })
            .fold(RowAccumulation::default(), RowAccumulation::push)
    }
}
