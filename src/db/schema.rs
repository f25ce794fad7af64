//! Schema 初始化子模块
//!
//! ## 职责
//! - 创建 `lookups` 表与时间索引
//! - 设置 SQLite 运行参数（WAL）
//! - 通过 `PRAGMA user_version` 记录版本，为后续迁移留出入口
//!
//! ## 错误语义
//! - DDL 失败统一映射为 `AppError::Database`

use rusqlite::Connection;

use crate::error::AppError;

const SCHEMA_VERSION: i64 = 1;

fn get_user_version(conn: &Connection) -> Result<i64, AppError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| AppError::Database(format!("读取数据库版本失败: {}", e)))
}

fn set_user_version(conn: &Connection, version: i64) -> Result<(), AppError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| AppError::Database(format!("写入数据库版本失败: {}", e)))
}

fn create_lookup_tables(conn: &Connection) -> Result<(), AppError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS lookups (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            term TEXT NOT NULL,
            found INTEGER NOT NULL DEFAULT 0 CHECK (found IN (0, 1)),
            summary TEXT,
            looked_up_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_lookups_looked_up_at ON lookups(looked_up_at DESC);",
    )
    .map_err(|e| AppError::Database(format!("创建历史表失败: {}", e)))
}

/// 创建表结构并升级到当前版本。
pub fn initialize_schema(conn: &Connection) -> Result<(), AppError> {
    // 内存数据库不支持 WAL，忽略失败
    let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");

    create_lookup_tables(conn)?;

    let version = get_user_version(conn)?;
    if version < SCHEMA_VERSION {
        log::info!("数据库 schema 升级: v{} -> v{}", version, SCHEMA_VERSION);
        set_user_version(conn, SCHEMA_VERSION)?;
    }
    Ok(())
}
