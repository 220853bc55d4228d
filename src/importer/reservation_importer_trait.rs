// ==========================================
// 酒店后台 - 预订导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::{CanonicalField, ImportBatch, ImportSummary};
use crate::importer::error::ImportResult;
use crate::importer::field_resolver::ResolvedFields;
use crate::importer::header_normalizer::NormalizedRow;
use crate::importer::raw_row::DecodedTable;
use crate::importer::row_failure::RowFailure;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// 一次导入的完整结果
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub batch: ImportBatch,
    pub summary: ImportSummary,
    pub failures: Vec<RowFailure>,
    /// 规范化后冲突的表头（后出现的列生效）
    pub header_collisions: Vec<String>,
    /// 文件中命中的别名列
    pub matched_columns: Vec<(CanonicalField, String)>,
    pub elapsed_time: Duration,
}

// ==========================================
// ReservationImporter Trait
// ==========================================
// 用途: 预订导入主接口
// 实现者: ReservationImporterImpl
#[async_trait]
pub trait ReservationImporter: Send + Sync {
    /// 从文件导入预订（整表替换）
    ///
    /// # 导入流程
    /// 1. 文件解码（按扩展名分派，CSV 先探测字符集）
    /// 2. 表头规范化
    /// 3. 字段解析（别名表）
    /// 4. 金额清洗
    /// 5. 准入判定 + 行级失败隔离
    /// 6. 整表替换落库（单事务）
    ///
    /// # 返回
    /// - Err: 文件级错误（格式不支持 / 读取失败）或落库失败，此时库中数据不变
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport>;

    /// 从上传内容导入（先暂存到上传目录，结束后删除）
    async fn import_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解码接口
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<DecodedTable>;
}

// ==========================================
// FieldResolver Trait
// ==========================================
// 用途: 规范字段解析接口
// 实现者: field_resolver::FieldResolver
pub trait FieldResolver: Send + Sync {
    /// 按别名优先级返回第一个存在且非空的值，找不到返回空串
    fn resolve<'a>(&self, row: &'a NormalizedRow, field: CanonicalField) -> &'a str;

    /// 解析全部 6 个字段
    fn resolve_all(&self, row: &NormalizedRow) -> ResolvedFields;

    /// 文件表头中命中的别名（用于诊断展示）
    fn matched_columns(&self, normalized_headers: &[String]) -> Vec<(CanonicalField, String)>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 值清洗接口
// 实现者: data_cleaner::DataCleaner
pub trait DataCleaner: Send + Sync {
    /// 金额文本 → 非负浮点数（失败为 0.0）
    fn sanitize_price(&self, raw: &str) -> f64;

    /// 客人姓名是否为占位值（空 / "nan" / 未知占位）
    fn is_placeholder_guest(&self, value: &str) -> bool;
}
