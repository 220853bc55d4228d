// ==========================================
// 酒店后台 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::alias_table::AliasTable;
use crate::db::open_sqlite_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// 别名表覆写（JSON，仅包含需要覆写的字段）
    pub const IMPORT_ALIAS_TABLE: &str = "import.alias_table";

    /// 上传大小上限（字节）
    pub const IMPORT_MAX_FILE_BYTES: &str = "import.max_file_bytes";
}

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        crate::db::ensure_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES (?1, ?2, ?3, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;

        Ok(())
    }

    /// 加载生效的别名表：默认表 + config_kv 覆写
    ///
    /// 覆写 JSON 无法解析时记录告警并使用默认表，不阻断导入。
    pub fn load_alias_table(&self) -> Result<AliasTable, Box<dyn Error>> {
        let mut table = AliasTable::default();

        if let Some(raw) = self.get_global_config_value(config_keys::IMPORT_ALIAS_TABLE)? {
            match AliasTable::from_json_str(&raw) {
                Ok(overrides) => {
                    debug!("应用别名表覆写");
                    table.merge_overrides(overrides);
                }
                Err(e) => {
                    warn!(error = %e, key = config_keys::IMPORT_ALIAS_TABLE, "别名表覆写解析失败，使用默认别名表");
                }
            }
        }

        Ok(table)
    }

    /// 保存别名表覆写
    pub fn save_alias_table(&self, table: &AliasTable) -> Result<(), Box<dyn Error>> {
        let json = serde_json::to_string(table)?;
        self.set_global_config_value(config_keys::IMPORT_ALIAS_TABLE, &json)
    }

    /// 读取上传大小上限
    pub fn get_max_file_bytes(&self) -> Result<Option<u64>, Box<dyn Error>> {
        match self.get_global_config_value(config_keys::IMPORT_MAX_FILE_BYTES)? {
            None => Ok(None),
            Some(v) => Ok(Some(v.trim().parse::<u64>().map_err(|e| {
                format!("配置值格式错误 (key: {}, value: {}): {}", config_keys::IMPORT_MAX_FILE_BYTES, v, e)
            })?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CanonicalField;

    fn in_memory_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::ensure_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_missing_value_is_none() {
        let manager = in_memory_manager();
        assert_eq!(manager.get_global_config_value("nope").unwrap(), None);
    }

    #[test]
    fn test_set_then_overwrite() {
        let manager = in_memory_manager();
        manager.set_global_config_value("k", "1").unwrap();
        manager.set_global_config_value("k", "2").unwrap();
        assert_eq!(manager.get_global_config_value("k").unwrap(), Some("2".to_string()));
    }

    #[test]
    fn test_alias_table_defaults_without_override() {
        let manager = in_memory_manager();
        assert_eq!(manager.load_alias_table().unwrap(), AliasTable::default());
    }

    #[test]
    fn test_alias_table_override_merges() {
        let manager = in_memory_manager();
        let mut overrides = AliasTable::empty();
        overrides.set(CanonicalField::RoomLabel, ["Unit Type", "Room"]);
        manager.save_alias_table(&overrides).unwrap();

        let table = manager.load_alias_table().unwrap();
        assert_eq!(table.aliases(CanonicalField::RoomLabel), &["Unit Type", "Room"]);
        assert_eq!(table.aliases(CanonicalField::Currency), &["العملة", "Currency"]);
    }

    #[test]
    fn test_broken_override_falls_back_to_defaults() {
        let manager = in_memory_manager();
        manager
            .set_global_config_value(config_keys::IMPORT_ALIAS_TABLE, "{not json")
            .unwrap();
        assert_eq!(manager.load_alias_table().unwrap(), AliasTable::default());
    }

    #[test]
    fn test_max_file_bytes_parse() {
        let manager = in_memory_manager();
        assert_eq!(manager.get_max_file_bytes().unwrap(), None);

        manager
            .set_global_config_value(config_keys::IMPORT_MAX_FILE_BYTES, "2048")
            .unwrap();
        assert_eq!(manager.get_max_file_bytes().unwrap(), Some(2048));

        manager
            .set_global_config_value(config_keys::IMPORT_MAX_FILE_BYTES, "big")
            .unwrap();
        assert!(manager.get_max_file_bytes().is_err());
    }
}
