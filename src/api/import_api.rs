// ==========================================
// 酒店后台 - 预订导入API
// ==========================================
// 职责: 封装预订导入、查询与批次追溯
// 红线: 文件级失败时库中数据保持不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportPipelineConfig;
use crate::domain::{CanonicalField, ImportBatch, RowFailureLog, StoredReservation};
use crate::i18n::t_with_args;
use crate::importer::{ImportReport, ReservationImporter, ReservationImporterImpl, RowFailure};
use crate::repository::{ReservationRepository, ReservationRepositoryImpl};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// 导入API响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportApiResponse {
    /// 批次ID
    pub batch_id: String,
    /// 文件名（上传时为原始文件名）
    pub file_name: Option<String>,
    /// 检测到的列（规范化后，文件顺序）
    pub detected_headers: Vec<String>,
    /// CSV 实际使用的字符集；Excel 为 None
    pub encoding: Option<String>,
    /// 读取的数据行数（含跳过与失败）
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    /// 行级失败明细
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub failures: Vec<RowFailure>,
    /// 规范化后冲突的表头
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub header_collisions: Vec<String>,
    /// 命中的别名列
    pub matched_columns: Vec<(CanonicalField, String)>,
    /// 导入耗时（毫秒）
    pub elapsed_ms: i64,
    /// 本地化提示
    pub message: String,
}

impl From<ImportReport> for ImportApiResponse {
    fn from(report: ImportReport) -> Self {
        let message = t_with_args(
            "import.success",
            &[("count", &report.summary.imported.to_string())],
        );

        Self {
            batch_id: report.batch.batch_id,
            file_name: report.batch.file_name,
            detected_headers: report.batch.detected_headers,
            encoding: report.batch.encoding,
            total_rows: report.summary.total_rows,
            imported: report.summary.imported,
            skipped: report.summary.skipped,
            failed: report.summary.failed,
            failures: report.failures,
            header_collisions: report.header_collisions,
            matched_columns: report.matched_columns,
            elapsed_ms: report.elapsed_time.as_millis() as i64,
            message,
        }
    }
}

/// 导入API
pub struct ImportApi {
    config: ImportPipelineConfig,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(config: ImportPipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ImportPipelineConfig {
        &self.config
    }

    fn create_repository(&self) -> ApiResult<ReservationRepositoryImpl> {
        ReservationRepositoryImpl::new(&self.config.db_path)
            .map_err(|e| ApiError::DatabaseConnectionError(format!("创建仓储失败: {}", e)))
    }

    fn create_importer(&self) -> ApiResult<ReservationImporterImpl<ReservationRepositoryImpl>> {
        Ok(ReservationImporterImpl::new(self.create_repository()?, &self.config))
    }

    /// 从文件路径导入预订（整表替换）
    ///
    /// # 返回
    /// - Ok(ImportApiResponse): 导入结果与诊断信息
    /// - Err(ApiError): 格式不支持 / 读取失败 / 落库失败，库中数据不变
    pub async fn import_reservations(&self, file_path: &str) -> ApiResult<ImportApiResponse> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput(crate::i18n::t("import.no_file")));
        }

        let importer = self.create_importer()?;
        let report = importer
            .import_file(Path::new(file_path))
            .await
            .map_err(|e| {
                warn!(error = %e, file_path, "导入失败");
                ApiError::from(e)
            })?;

        Ok(report.into())
    }

    /// 从上传内容导入预订
    ///
    /// # 参数
    /// - file_name: 客户端提供的原始文件名（决定格式）
    /// - bytes: 文件内容
    pub async fn import_upload(&self, file_name: &str, bytes: &[u8]) -> ApiResult<ImportApiResponse> {
        if file_name.trim().is_empty() {
            return Err(ApiError::InvalidInput(crate::i18n::t("import.no_file")));
        }

        let importer = self.create_importer()?;
        let report = importer.import_upload(file_name, bytes).await.map_err(|e| {
            warn!(error = %e, file_name, "上传导入失败");
            ApiError::from(e)
        })?;

        Ok(report.into())
    }

    /// 列出预订（最新在前）
    pub async fn list_reservations(&self, limit: Option<usize>) -> ApiResult<Vec<StoredReservation>> {
        let repo = self.create_repository()?;
        Ok(repo.list_reservations(limit).await?)
    }

    /// 预订总数
    pub async fn count_reservations(&self) -> ApiResult<usize> {
        let repo = self.create_repository()?;
        Ok(repo.count_reservations().await?)
    }

    /// 最近的导入批次（最新在前）
    pub async fn list_batches(&self, limit: usize) -> ApiResult<Vec<ImportBatch>> {
        let repo = self.create_repository()?;
        Ok(repo.list_batches(limit.max(1)).await?)
    }

    /// 查询批次的行级失败
    pub async fn get_row_failures(&self, batch_id: &str) -> ApiResult<Vec<RowFailureLog>> {
        if batch_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("batch_id 不能为空".to_string()));
        }
        let repo = self.create_repository()?;
        Ok(repo.get_row_failures(batch_id).await?)
    }
}
