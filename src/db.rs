//! 查词历史数据库模块
//!
//! # 设计思路
//!
//! 每次查词（无论是否查到）都记录一行，托盘菜单"Lookup history"打开的窗口
//! 通过 Tauri IPC 读取最近的记录。使用 `rusqlite` 直接操作 SQLite。
//!
//! # 实现思路
//!
//! - 数据库文件位于 `<app_data_dir>/wordpeek.db`。
//! - 连接包装为 `DbState(Mutex<Connection>)` 注册为托管状态。
//! - 打开失败时应用仍可运行，只是不记录历史。

use std::fs;
use std::sync::Mutex;

use rusqlite::Connection;
use tauri::{AppHandle, Manager};

use crate::error::AppError;

mod history;
mod schema;

pub use history::*;
pub use schema::initialize_schema;

const DB_FILE_NAME: &str = "wordpeek.db";

/// 数据库连接封装，由 Tauri 托管
pub struct DbState(pub Mutex<Connection>);

impl DbState {
    pub(crate) fn with_conn<T>(
        &self,
        op: impl FnOnce(&Connection) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let conn = self
            .0
            .lock()
            .map_err(|e| AppError::Database(format!("获取数据库锁失败: {}", e)))?;
        op(&conn)
    }
}

/// 初始化数据库连接与 Schema
///
/// 在 `main.rs` 的 `setup` 阶段调用。
pub fn init_db(app: &AppHandle) -> Result<DbState, AppError> {
    let app_data_dir = app
        .path()
        .app_data_dir()
        .map_err(|e| AppError::Database(format!("获取应用数据目录失败: {}", e)))?;
    fs::create_dir_all(&app_data_dir)
        .map_err(|e| AppError::Database(format!("创建数据库目录失败: {}", e)))?;

    let db_path = app_data_dir.join(DB_FILE_NAME);
    log::info!("数据库路径: {}", db_path.display());

    let conn = Connection::open(&db_path)
        .map_err(|e| AppError::Database(format!("打开数据库失败: {}", e)))?;
    initialize_schema(&conn)?;

    Ok(DbState(Mutex::new(conn)))
}
