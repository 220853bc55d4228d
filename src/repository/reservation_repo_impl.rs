// ==========================================
// 酒店后台 - 预订 Repository 实现
// ==========================================
// 职责: 实现导入预订相关数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{ensure_schema, open_sqlite_connection};
use crate::domain::{ImportBatch, ReservationRecord, RowFailureLog, StoredReservation};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::reservation_repo::ReservationRepository;
use async_trait::async_trait;
use rusqlite::{params, Connection, Transaction, TransactionBehavior};
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// ReservationRepositoryImpl
// ==========================================
pub struct ReservationRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ReservationRepositoryImpl {
    /// 创建新的 Repository 实例（建表幂等）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（调用方负责建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中写入批次记录
    fn insert_batch_tx(tx: &Transaction, batch: &ImportBatch) -> RepositoryResult<()> {
        tx.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, file_name, encoding, total_rows, imported_rows,
                skipped_rows, failed_rows, detected_headers_json, imported_at, elapsed_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                batch.batch_id,
                batch.file_name,
                batch.encoding,
                batch.total_rows as i64,
                batch.imported_rows as i64,
                batch.skipped_rows as i64,
                batch.failed_rows as i64,
                serde_json::to_string(&batch.detected_headers)?,
                batch.imported_at.to_rfc3339(),
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }

    /// 在事务中批量插入预订
    fn insert_reservations_tx(
        tx: &Transaction,
        records: &[ReservationRecord],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT INTO reservation (guest_name, check_in, check_out, room, price, currency)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )?;

        let mut count = 0;
        for record in records {
            stmt.execute(params![
                record.guest_name,
                record.check_in,
                record.check_out,
                record.room,
                record.price,
                record.currency,
            ])?;
            count += 1;
        }

        Ok(count)
    }

    /// 在事务中批量插入行级失败
    fn insert_failures_tx(
        tx: &Transaction,
        batch_id: &str,
        failures: &[RowFailureLog],
    ) -> RepositoryResult<()> {
        let mut stmt = tx.prepare(
            "INSERT INTO import_row_failure (batch_id, row_number, reason) VALUES (?1, ?2, ?3)",
        )?;
        for failure in failures {
            stmt.execute(params![batch_id, failure.row_number as i64, failure.reason])?;
        }
        Ok(())
    }

    fn map_batch_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ImportBatch> {
        let headers_json: String = row.get(7)?;
        let detected_headers = serde_json::from_str(&headers_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(7, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ImportBatch {
            batch_id: row.get(0)?,
            file_name: row.get(1)?,
            encoding: row.get(2)?,
            total_rows: row.get::<_, i64>(3)? as usize,
            imported_rows: row.get::<_, i64>(4)? as usize,
            skipped_rows: row.get::<_, i64>(5)? as usize,
            failed_rows: row.get::<_, i64>(6)? as usize,
            detected_headers,
            // rusqlite 的 chrono 特性直接解析 RFC3339 文本
            imported_at: row.get(8)?,
            elapsed_ms: row.get(9)?,
        })
    }
}

#[async_trait]
impl ReservationRepository for ReservationRepositoryImpl {
    async fn replace_all(
        &self,
        batch: &ImportBatch,
        records: &[ReservationRecord],
        failures: &[RowFailureLog],
    ) -> RepositoryResult<usize> {
        let mut conn = self.lock()?;

        // IMMEDIATE: 开始即持有写锁，避免与并发导入交错
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tx.execute("DELETE FROM reservation", [])?;
        let count = Self::insert_reservations_tx(&tx, records)?;
        Self::insert_batch_tx(&tx, batch)?;
        Self::insert_failures_tx(&tx, &batch.batch_id, failures)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    async fn list_reservations(&self, limit: Option<usize>) -> RepositoryResult<Vec<StoredReservation>> {
        let conn = self.lock()?;

        // SQLite 中 LIMIT -1 表示不限
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let mut stmt = conn.prepare(
            r#"
            SELECT id, guest_name, check_in, check_out, room, price, currency
            FROM reservation
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )?;

        let reservations = stmt
            .query_map(params![limit], |row| {
                Ok(StoredReservation {
                    id: row.get(0)?,
                    record: ReservationRecord {
                        guest_name: row.get(1)?,
                        check_in: row.get(2)?,
                        check_out: row.get(3)?,
                        room: row.get(4)?,
                        price: row.get(5)?,
                        currency: row.get(6)?,
                    },
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(reservations)
    }

    async fn count_reservations(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM reservation", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn list_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, file_name, encoding, total_rows, imported_rows,
                   skipped_rows, failed_rows, detected_headers_json, imported_at, elapsed_ms
            FROM import_batch
            ORDER BY imported_at DESC, rowid DESC
            LIMIT ?1
            "#,
        )?;

        let batches = stmt
            .query_map(params![limit as i64], Self::map_batch_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(batches)
    }

    async fn get_row_failures(&self, batch_id: &str) -> RepositoryResult<Vec<RowFailureLog>> {
        let conn = self.lock()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT row_number, reason
            FROM import_row_failure
            WHERE batch_id = ?1
            ORDER BY row_number ASC
            "#,
        )?;

        let failures = stmt
            .query_map(params![batch_id], |row| {
                Ok(RowFailureLog {
                    row_number: row.get::<_, i64>(0)? as usize,
                    reason: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(failures)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn in_memory_repo() -> ReservationRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        ReservationRepositoryImpl::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn batch(id: &str, imported: usize) -> ImportBatch {
        ImportBatch {
            batch_id: id.to_string(),
            file_name: Some("bookings.csv".to_string()),
            encoding: Some("UTF-8".to_string()),
            total_rows: imported,
            imported_rows: imported,
            skipped_rows: 0,
            failed_rows: 0,
            detected_headers: vec!["Guest Name".to_string()],
            imported_at: Utc::now(),
            elapsed_ms: 3,
        }
    }

    fn record(name: &str) -> ReservationRecord {
        ReservationRecord::with_defaults(name, "2025-01-01", "2025-01-02", "101", 10.0, "EGP")
    }

    #[tokio::test]
    async fn test_replace_all_discards_previous_set() {
        let repo = in_memory_repo();

        repo.replace_all(&batch("b1", 2), &[record("A"), record("B")], &[])
            .await
            .unwrap();
        let count = repo
            .replace_all(&batch("b2", 1), &[record("C")], &[])
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(repo.count_reservations().await.unwrap(), 1);
        let listed = repo.list_reservations(None).await.unwrap();
        assert_eq!(listed[0].record.guest_name, "C");
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_on_failure() {
        let repo = in_memory_repo();
        repo.replace_all(&batch("b1", 1), &[record("A")], &[])
            .await
            .unwrap();

        // 重复的 batch_id 触发主键冲突，整个事务应回滚
        let result = repo
            .replace_all(&batch("b1", 1), &[record("X"), record("Y")], &[])
            .await;

        assert!(matches!(result, Err(RepositoryError::UniqueConstraintViolation(_))));
        let listed = repo.list_reservations(None).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].record.guest_name, "A");
    }

    #[tokio::test]
    async fn test_list_reservations_newest_first_with_limit() {
        let repo = in_memory_repo();
        repo.replace_all(&batch("b1", 3), &[record("A"), record("B"), record("C")], &[])
            .await
            .unwrap();

        let listed = repo.list_reservations(Some(2)).await.unwrap();
        let names: Vec<&str> = listed.iter().map(|r| r.record.guest_name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[tokio::test]
    async fn test_batches_and_failures_recorded() {
        let repo = in_memory_repo();
        let failures = vec![
            RowFailureLog {
                row_number: 4,
                reason: "bad".to_string(),
            },
            RowFailureLog {
                row_number: 2,
                reason: "worse".to_string(),
            },
        ];
        let written = batch("b1", 1);
        repo.replace_all(&written, &[record("A")], &failures)
            .await
            .unwrap();

        let batches = repo.list_batches(10).await.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].batch_id, "b1");
        assert_eq!(batches[0].detected_headers, vec!["Guest Name".to_string()]);
        assert_eq!(batches[0].imported_at, written.imported_at);
        assert_eq!(batches[0].elapsed_ms, 3);

        let stored = repo.get_row_failures("b1").await.unwrap();
        assert_eq!(stored.iter().map(|f| f.row_number).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[tokio::test]
    async fn test_list_batches_rejects_corrupt_headers() {
        let repo = in_memory_repo();
        repo.replace_all(&batch("b1", 1), &[record("A")], &[])
            .await
            .unwrap();
        repo.lock()
            .unwrap()
            .execute("UPDATE import_batch SET detected_headers_json = 'not json'", [])
            .unwrap();

        let result = repo.list_batches(10).await;
        assert!(matches!(result, Err(RepositoryError::DatabaseQueryError(_))));
    }
}
