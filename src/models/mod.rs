//! # 数据模型模块
//!
//! 定义了与前端页面交互的 Rust 数据结构。
//! 所有结构体均派生 `Serialize` / `Deserialize`，用于 Tauri IPC 传输和 JSON 文件读写。
//! - `card` - 抽认卡（问题/答案对）
//! - `session` - 复习会话的请求状态与前端视图快照
//! - `settings` - 深色模式偏好与生成器配置

pub mod card;
pub mod session;
pub mod settings;
