// ==========================================
// 酒店后台 - 预订导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到数据库
// 流程: 解码 → 表头规范化 → 字段解析 → 清洗 → 准入/累加 → 整表替换
// 失败策略: 文件级错误在写库前中止；行级错误只跳过该行
// ==========================================

use crate::config::ImportPipelineConfig;
use crate::domain::{ImportBatch, ImportSummary, RowFailureLog};
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::ImportResult;
use crate::importer::field_resolver::FieldResolver as FieldResolverImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::header_normalizer::{find_header_collisions, normalize_header};
use crate::importer::reservation_importer_trait::{
    DataCleaner, FieldResolver, FileParser, ImportReport, ReservationImporter,
};
use crate::importer::row_validator::RowValidator;
use crate::importer::upload::stage_upload;
use crate::repository::ReservationRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ReservationImporterImpl - 预订导入器实现
// ==========================================
pub struct ReservationImporterImpl<R>
where
    R: ReservationRepository,
{
    // 数据访问层
    repo: R,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_resolver: Box<dyn FieldResolver>,
    data_cleaner: Box<dyn DataCleaner>,

    // 上传暂存
    upload_dir: PathBuf,
    max_file_bytes: u64,
}

impl<R> ReservationImporterImpl<R>
where
    R: ReservationRepository,
{
    /// 按管道配置创建导入器（默认组件）
    pub fn new(repo: R, config: &ImportPipelineConfig) -> Self {
        Self::with_components(
            repo,
            Box::new(UniversalFileParser::new(config.max_file_bytes)),
            Box::new(FieldResolverImpl::new(&config.aliases)),
            Box::new(DataCleanerImpl),
            config.upload_dir.clone(),
            config.max_file_bytes,
        )
    }

    /// 使用自定义组件创建导入器
    pub fn with_components(
        repo: R,
        file_parser: Box<dyn FileParser>,
        field_resolver: Box<dyn FieldResolver>,
        data_cleaner: Box<dyn DataCleaner>,
        upload_dir: PathBuf,
        max_file_bytes: u64,
    ) -> Self {
        Self {
            repo,
            file_parser,
            field_resolver,
            data_cleaner,
            upload_dir,
            max_file_bytes,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 导入主流程；display_name 用于批次记录（上传时为原始文件名）
    async fn run(&self, file_path: &Path, display_name: &str) -> ImportResult<ImportReport> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(batch_id = %batch_id, file = %display_name, "开始导入预订数据");

        // === 步骤 1: 解码文件 ===
        debug!("步骤 1: 解码文件");
        let table = self.file_parser.parse_to_raw_records(file_path).map_err(|e| {
            error!(error = %e, "文件解码失败，未修改任何数据");
            e
        })?;
        let total_rows = table.row_count();
        info!(total_rows, encoding = ?table.encoding, "文件解码完成");

        // === 步骤 2: 表头诊断 ===
        debug!("步骤 2: 表头规范化");
        let detected_headers: Vec<String> =
            table.headers.iter().map(|h| normalize_header(h)).collect();
        let header_collisions = find_header_collisions(&table.headers);
        if !header_collisions.is_empty() {
            warn!(collisions = ?header_collisions, "表头规范化后重复，后出现的列生效");
        }
        let matched_columns = self.field_resolver.matched_columns(&detected_headers);
        info!(headers = ?detected_headers, matched = matched_columns.len(), "检测到的列");

        // === 步骤 3: 字段解析 + 清洗 + 准入 ===
        debug!("步骤 3: 行处理");
        let validator = RowValidator::new(self.field_resolver.as_ref(), self.data_cleaner.as_ref());
        let accumulation = validator.accumulate(table.rows);
        info!(
            admitted = accumulation.admitted(),
            skipped = accumulation.skipped,
            failed = accumulation.failures.len(),
            "行处理完成"
        );

        // === 步骤 4: 整表替换 ===
        debug!("步骤 4: 整表替换");
        let batch = ImportBatch {
            batch_id: batch_id.clone(),
            file_name: Some(display_name.to_string()),
            encoding: table.encoding.clone(),
            total_rows,
            imported_rows: accumulation.admitted(),
            skipped_rows: accumulation.skipped,
            failed_rows: accumulation.failures.len(),
            detected_headers,
            imported_at: Utc::now(),
            elapsed_ms: start_time.elapsed().as_millis() as i64,
        };
        let failure_logs: Vec<RowFailureLog> = accumulation
            .failures
            .iter()
            .map(|f| RowFailureLog {
                row_number: f.row_number,
                reason: f.reason.to_string(),
            })
            .collect();

        let imported = self
            .repo
            .replace_all(&batch, &accumulation.records, &failure_logs)
            .await
            .map_err(|e| {
                error!(error = %e, "整表替换失败，事务已回滚");
                e
            })?;

        let elapsed_time = start_time.elapsed();
        let summary = ImportSummary {
            total_rows,
            imported,
            skipped: accumulation.skipped,
            failed: accumulation.failures.len(),
        };

        info!(
            batch_id = %batch_id,
            total = total_rows,
            imported,
            skipped = summary.skipped,
            failed = summary.failed,
            elapsed_ms = elapsed_time.as_millis(),
            "预订数据导入完成"
        );

        Ok(ImportReport {
            batch,
            summary,
            failures: accumulation.failures,
            header_collisions,
            matched_columns,
            elapsed_time,
        })
    }
}

#[async_trait]
impl<R> ReservationImporter for ReservationImporterImpl<R>
where
    R: ReservationRepository,
{
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportReport> {
        let display_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        self.run(file_path, &display_name).await
    }

    #[instrument(skip(self, bytes), fields(batch_id, size = bytes.len()))]
    async fn import_upload(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportReport> {
        // 暂存文件在本函数结束时（含出错路径）删除
        let staged = stage_upload(&self.upload_dir, file_name, bytes, self.max_file_bytes)?;
        self.run(staged.path(), staged.original_name()).await
    }
}
