//! # Tauri Command 处理模块
//!
//! 本模块包含所有注册到 Tauri 的 command 处理函数，每个子模块对应一个功能域：
//! - `session` - 卡组生成、导航与翻面
//! - `settings` - 深色模式偏好与生成器配置

pub mod session;
pub mod settings;
