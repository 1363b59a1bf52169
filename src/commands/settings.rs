//! # 偏好与配置 Tauri Commands
//!
//! - `get_preference` - 获取当前深色模式偏好
//! - `toggle_dark_mode` - 切换深色模式、写回存储并应用窗口主题
//! - `get_generator_config` - 获取启动时加载的生成器配置（只读）

use tauri::{State, Theme, WebviewWindow};

use crate::models::settings::{GeneratorConfig, Preference};
use crate::services::preference;
use crate::services::state::AppState;

/// 将深色模式偏好应用到窗口主题
///
/// 前端页面同时根据返回的 `Preference` 切换根元素的 `dark` class。
pub fn apply_theme(window: &WebviewWindow, preference: Preference) {
    let theme = if preference.dark_mode {
        Theme::Dark
    } else {
        Theme::Light
    };
    if let Err(e) = window.set_theme(Some(theme)) {
        log::warn!("应用窗口主题失败: {}", e);
    }
}

/// 获取当前深色模式偏好
#[tauri::command]
pub fn get_preference(state: State<'_, AppState>) -> Preference {
    *state.lock_preference()
}

/// 切换深色模式
///
/// 内存中的偏好与窗口主题总会被切换；
/// 写回存储失败时返回错误信息，前端可提示"设置未保存"。
///
/// # 返回值
/// 切换后的偏好
#[tauri::command]
pub fn toggle_dark_mode(
    window: WebviewWindow,
    state: State<'_, AppState>,
) -> Result<Preference, String> {
    let mut current = state.lock_preference();
    let result = preference::toggle_dark_mode(&mut current, state.store.as_ref());
    apply_theme(&window, *current);

    if let Err(e) = &result {
        log::error!("保存深色模式偏好失败: {}", e);
    }
    result
}

/// 获取生成器配置
#[tauri::command]
pub fn get_generator_config(state: State<'_, AppState>) -> GeneratorConfig {
    state.config.clone()
}
