use rusqlite::{Connection, params};
use serde::Serialize;
use tauri::{AppHandle, Manager};

use crate::error::AppError;

use super::DbState;

const DEFAULT_HISTORY_PAGE: i64 = 100;

/// 一条查词历史
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRecord {
    pub id: i64,
    pub term: String,
    pub found: bool,
    pub summary: Option<String>,
    /// 毫秒时间戳
    pub looked_up_at: i64,
}

/// 写入一条记录并裁剪到最新的 `keep` 条；`keep == 0` 时不记录。
pub fn record_lookup(
    conn: &Connection,
    term: &str,
    found: bool,
    summary: Option<&str>,
    keep: usize,
) -> Result<(), AppError> {
    record_lookup_at(
        conn,
        term,
        found,
        summary,
        keep,
        chrono::Local::now().timestamp_millis(),
    )
}

pub(crate) fn record_lookup_at(
    conn: &Connection,
    term: &str,
    found: bool,
    summary: Option<&str>,
    keep: usize,
    looked_up_at: i64,
) -> Result<(), AppError> {
    let term = term.trim();
    if keep == 0 || term.is_empty() {
        return Ok(());
    }

    conn.execute(
        "INSERT INTO lookups (term, found, summary, looked_up_at) VALUES (?1, ?2, ?3, ?4)",
        params![term, found, summary, looked_up_at],
    )
    .map_err(|e| AppError::Database(format!("写入查词历史失败: {}", e)))?;

    prune_history(conn, keep)
}

/// 只保留最新的 `keep` 条记录。
pub fn prune_history(conn: &Connection, keep: usize) -> Result<(), AppError> {
    let keep = i64::try_from(keep).unwrap_or(i64::MAX);
    let removed = conn
        .execute(
            "DELETE FROM lookups WHERE id NOT IN (
                SELECT id FROM lookups ORDER BY looked_up_at DESC, id DESC LIMIT ?1
            )",
            params![keep],
        )
        .map_err(|e| AppError::Database(format!("裁剪查词历史失败: {}", e)))?;
    if removed > 0 {
        log::debug!("🧹 已裁剪 {} 条旧的查词历史", removed);
    }
    Ok(())
}

/// 按时间倒序读取最近的记录。
pub fn recent_lookups(conn: &Connection, limit: i64) -> Result<Vec<LookupRecord>, AppError> {
    let mut stmt = conn
        .prepare(
            "SELECT id, term, found, summary, looked_up_at
             FROM lookups
             ORDER BY looked_up_at DESC, id DESC
             LIMIT ?1",
        )
        .map_err(|e| AppError::Database(format!("准备查询失败: {}", e)))?;

    let records = stmt
        .query_map(params![limit], |row| {
            Ok(LookupRecord {
                id: row.get(0)?,
                term: row.get(1)?,
                found: row.get(2)?,
                summary: row.get(3)?,
                looked_up_at: row.get(4)?,
            })
        })
        .map_err(|e| AppError::Database(format!("查询历史失败: {}", e)))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Database(format!("读取行失败: {}", e)))?;

    Ok(records)
}

pub fn clear_history(conn: &Connection) -> Result<(), AppError> {
    conn.execute("DELETE FROM lookups", [])
        .map_err(|e| AppError::Database(format!("清空查词历史失败: {}", e)))?;
    Ok(())
}

// ============================================================================
// Tauri Commands
// ============================================================================

#[tauri::command]
pub fn get_lookup_history(
    app: AppHandle,
    limit: Option<i64>,
) -> Result<Vec<LookupRecord>, AppError> {
    let Some(state) = app.try_state::<DbState>() else {
        return Ok(Vec::new());
    };
    let limit = limit.unwrap_or(DEFAULT_HISTORY_PAGE).max(0);
    state.with_conn(|conn| recent_lookups(conn, limit))
}

#[tauri::command]
pub fn clear_lookup_history(app: AppHandle) -> Result<(), AppError> {
    let Some(state) = app.try_state::<DbState>() else {
        return Ok(());
    };
    state.with_conn(clear_history)
}
