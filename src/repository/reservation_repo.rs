// ==========================================
// 酒店后台 - 预订 Repository Trait
// ==========================================
// 职责: 定义导入预订相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::{ImportBatch, ReservationRecord, RowFailureLog, StoredReservation};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ReservationRepository Trait
// ==========================================
// 用途: 导入预订的整表替换与查询
// 实现者: ReservationRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// 整表替换（单事务）
    ///
    /// 删除全部旧预订 → 插入新预订 → 记录批次与行级失败。
    /// 任一步失败整个事务回滚，并发读者看不到中间状态。
    ///
    /// # 返回
    /// - Ok(usize): 插入的预订数
    async fn replace_all(
        &self,
        batch: &ImportBatch,
        records: &[ReservationRecord],
        failures: &[RowFailureLog],
    ) -> RepositoryResult<usize>;

    /// 列出预订（最新在前）
    async fn list_reservations(&self, limit: Option<usize>) -> RepositoryResult<Vec<StoredReservation>>;

    /// 预订总数
    async fn count_reservations(&self) -> RepositoryResult<usize>;

    /// 最近的导入批次（最新在前）
    async fn list_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>>;

    /// 查询批次的行级失败
    async fn get_row_failures(&self, batch_id: &str) -> RepositoryResult<Vec<RowFailureLog>>;
}
