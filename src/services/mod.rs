//! # 业务逻辑服务模块
//!
//! 包含全部业务逻辑，与 Tauri command 层解耦：
//! - `session` - 复习会话状态机（导航、翻面、请求生命周期）
//! - `review` - 会话控制器：驱动一次完整的生成往返
//! - `generator` - 抽认卡生成接口及其 HTTP 实现（外部服务 / Ollama）
//! - `error` - 生成请求的错误类型
//! - `preference` - 键值存储接口与深色模式偏好的解析、切换、持久化
//! - `config` - 生成器配置加载
//! - `state` - Tauri managed state

pub mod config;
pub mod error;
pub mod generator;
pub mod preference;
pub mod review;
pub mod session;
pub mod state;
