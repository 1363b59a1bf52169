//! # AI Flashcards - Tauri 应用核心初始化模块
//!
//! 本模块负责 Tauri 应用的完整初始化流程：
//! - 加载生成器配置并解析深色模式初始值
//! - 初始化应用全局状态（复习会话、偏好、生成器）
//! - 注册自定义 Tauri commands
//! - 生成应用上下文并启动事件循环
//!
//! ## 模块结构
//! - `commands/` - Tauri command 处理函数（IPC 接口层）
//! - `models/` - 数据模型（对应前端类型）
//! - `services/` - 核心业务逻辑（会话状态机、生成器、偏好存储）
//! - `utils/` - 通用工具函数

mod commands;
mod models;
mod services;
mod utils;

use tauri::{Manager, Theme};

use services::config;
use services::preference::JsonFileStore;
use services::state::AppState;
use utils::path;

/// 主窗口标签（见 `tauri.conf.json`）
const MAIN_WINDOW: &str = "main";

#[cfg_attr(mobile, tauri::mobile_entry_point)]
/// Tauri 应用启动函数
///
/// # Panics
/// Tauri 应用启动失败（例如配置文件缺失或窗口创建失败）时 panic。
pub fn run() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            // 复习会话 commands
            commands::session::get_session,
            commands::session::generate_flashcards,
            commands::session::next_card,
            commands::session::previous_card,
            commands::session::flip_card,
            // 偏好与配置 commands
            commands::settings::get_preference,
            commands::settings::toggle_dark_mode,
            commands::settings::get_generator_config,
        ])
        .setup(|app| {
            // 仅在开发调试模式下启用日志插件
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let config_dir = path::get_app_config_path()?;
            let generator_config =
                config::load_generator_config(&path::generator_config_file(&config_dir));
            log::info!(
                "生成后端: {:?}, 请求超时 {} 秒",
                generator_config.backend,
                generator_config.request_timeout_secs
            );

            // 平台外观信号：主窗口创建时的系统主题
            let window = app.get_webview_window(MAIN_WINDOW);
            let platform_dark = window
                .as_ref()
                .and_then(|w| w.theme().ok())
                .map(|theme| matches!(theme, Theme::Dark));

            let state = AppState::new(
                generator_config,
                JsonFileStore::new(path::preferences_file(&config_dir)),
                platform_dark,
            )?;

            if let Some(window) = &window {
                commands::settings::apply_theme(window, *state.lock_preference());
            }

            app.manage(state);
            Ok(())
        })
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
