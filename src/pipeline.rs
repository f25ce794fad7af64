//! 查词流程编排
//!
//! ```text
//! 快捷键松开
//!    ↓
//! trigger ── RUN_GATE 已占用 → 忽略
//!    ↓
//! capture_selection ── 无内容 → "No selection"
//!    ↓
//! 确认框（可关闭） ── No → 结束
//!    ↓
//! 打开"加载中"结果窗口
//!    ↓
//! LookupService::lookup（缓存 → HTTP） → 写历史
//!    ├─ Found    → 更新结果窗口
//!    ├─ NotFound → 关窗口 + "Not found"
//!    └─ Failed   → 关窗口 + "Lookup Error"
//! ```
//!
//! 同一时间只允许一次流程，确认框未关闭时再次按快捷键不会叠加弹窗。

use std::sync::atomic::{AtomicBool, Ordering};

use tauri::{AppHandle, Manager};

use crate::db::{self, DbState};
use crate::dictionary::LookupOutcome;
use crate::error::AppError;
use crate::lookup::LookupService;
use crate::popup::{self, NO_SELECTION_MESSAGE, NO_SELECTION_TITLE, dialog};
use crate::selection::{self, Selection};
use crate::settings::SettingsState;

const CONFIRM_TITLE: &str = "Lookup word?";
const NOT_FOUND_TITLE: &str = "Not found";
const LOOKUP_ERROR_TITLE: &str = "Lookup Error";

/// 互斥闸门：保证同一时间只有一次查词流程。
pub struct RunGate {
    busy: AtomicBool,
}

/// 闸门凭证，`Drop` 时自动释放闸门（包括 panic 与提前返回）。
pub struct RunTicket<'a> {
    gate: &'a RunGate,
}

impl RunGate {
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    pub fn try_enter(&self) -> Option<RunTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunTicket { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl Default for RunGate {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RunTicket<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::SeqCst);
    }
}

static RUN_GATE: RunGate = RunGate::new();

/// 快捷键入口：在异步运行时中执行一次完整流程。
pub fn trigger(app: AppHandle) {
    let Some(ticket) = RUN_GATE.try_enter() else {
        log::debug!("⏭️ 上一次查词尚未结束，忽略本次快捷键");
        return;
    };

    tauri::async_runtime::spawn(async move {
        let _ticket = ticket;
        if let Err(err) = run_from_hotkey(&app).await {
            log::error!("查词流程失败: {}", err);
            dialog::show_error(&app, LOOKUP_ERROR_TITLE, &err.to_string());
        }
    });
}

async fn run_from_hotkey(app: &AppHandle) -> Result<(), AppError> {
    let settings = app.state::<SettingsState>().snapshot();

    let Some(selection) = selection::capture_selection(settings.capture_options()).await else {
        log::info!("未捕获到选中文本");
        dialog::show_info(app, NO_SELECTION_TITLE, NO_SELECTION_MESSAGE);
        return Ok(());
    };
    log::info!("📖 捕获到选中文本，查询词: {:?}", selection.term);

    if settings.confirm_before_lookup {
        let confirmed =
            dialog::ask_yes_no(app, CONFIRM_TITLE, &popup::confirm_message(&selection.text)).await;
        if !confirmed {
            log::debug!("用户取消查询");
            return Ok(());
        }
    }

    lookup_and_show(app, &selection, settings.history_limit).await
}

/// 历史窗口入口：直接查询给定的词。
pub async fn lookup_term(app: AppHandle, term: String) -> Result<(), AppError> {
    let Some(selection) = Selection::from_term(&term) else {
        return Ok(());
    };
    let Some(_ticket) = RUN_GATE.try_enter() else {
        log::debug!("⏭️ 上一次查词尚未结束，忽略历史窗口的查询");
        return Ok(());
    };
    let history_limit = app.state::<SettingsState>().snapshot().history_limit;
    lookup_and_show(&app, &selection, history_limit).await
}

async fn lookup_and_show(
    app: &AppHandle,
    selection: &Selection,
    history_limit: usize,
) -> Result<(), AppError> {
    let Some(service) = app.try_state::<LookupService>() else {
        return Err(AppError::Storage("查询服务未初始化".into()));
    };

    let label = popup::open_loading_window(app, &selection.text)?;
    let outcome = service.lookup(&selection.term).await;
    record_history(app, &selection.term, &outcome, history_limit);

    match outcome {
        LookupOutcome::Found(definition) => {
            log::info!("✅ 查询成功: {}", selection.term);
            popup::show_definition(app, &label, &selection.text, definition)
        }
        LookupOutcome::NotFound => {
            log::info!("查无此词: {}", selection.term);
            popup::close_window(app, &label);
            dialog::show_info(app, NOT_FOUND_TITLE, &popup::not_found_message(&selection.text));
            Ok(())
        }
        LookupOutcome::Failed(err) => {
            log::warn!("⚠️ 查询失败 {}: {}", selection.term, err);
            popup::close_window(app, &label);
            dialog::show_error(
                app,
                LOOKUP_ERROR_TITLE,
                &popup::lookup_error_message(&selection.text, &err.to_string()),
            );
            Ok(())
        }
    }
}

/// 写入查词历史；失败结果不记录，写入失败只记日志。
fn record_history(app: &AppHandle, term: &str, outcome: &LookupOutcome, limit: usize) {
    let (found, summary) = match outcome {
        LookupOutcome::Found(definition) => (true, definition.summary.as_deref()),
        LookupOutcome::NotFound => (false, None),
        LookupOutcome::Failed(_) => return,
    };
    let Some(state) = app.try_state::<DbState>() else {
        return;
    };

    match state.with_conn(|conn| db::record_lookup(conn, term, found, summary, limit)) {
        Ok(()) => popup::notify_history_changed(app),
        Err(err) => log::error!("记录查词历史失败: {}", err),
    }
}
