//! # 复习会话 Tauri Commands
//!
//! - `get_session` - 获取当前会话视图
//! - `generate_flashcards` - 生成新卡组
//! - `next_card` / `previous_card` - 循环导航
//! - `flip_card` - 翻面
//!
//! 所有 command 都返回最新的 `SessionView`，前端据此重绘。

use tauri::State;

use crate::models::session::SessionView;
use crate::services::review;
use crate::services::session::SessionState;
use crate::services::state::AppState;

/// 获取当前会话视图
///
/// 前端在页面加载时调用一次，用于恢复显示（如开发时热重载页面）。
#[tauri::command]
pub fn get_session(state: State<'_, AppState>) -> SessionView {
    review::snapshot(&state.session)
}

/// 生成新卡组
///
/// 向配置的生成后端发出一次请求。校验失败、服务报错、空结果、网络失败
/// 都通过返回视图的 `status = error` 与 `errorMessage` 体现。
///
/// # 参数
/// - `subject` - 主题（必填）
/// - `num_cards` - 卡片数量（1 - 20）
///
/// # 错误
/// 已有生成请求进行中时返回错误信息
#[tauri::command]
pub async fn generate_flashcards(
    subject: String,
    num_cards: u32,
    state: State<'_, AppState>,
) -> Result<SessionView, String> {
    review::generate(&state.session, &state.generator, &subject, num_cards)
        .await
        .map_err(|e| e.to_string())
}

/// 下一张（最后一张之后回到第一张）
#[tauri::command]
pub fn next_card(state: State<'_, AppState>) -> SessionView {
    review::apply(&state.session, SessionState::next)
}

/// 上一张（第一张之前是最后一张）
#[tauri::command]
pub fn previous_card(state: State<'_, AppState>) -> SessionView {
    review::apply(&state.session, SessionState::previous)
}

/// 在问题与答案之间翻面
#[tauri::command]
pub fn flip_card(state: State<'_, AppState>) -> SessionView {
    review::apply(&state.session, SessionState::toggle_flip)
}
