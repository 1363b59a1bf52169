//! # 偏好与配置数据模型
//!
//! 定义深色模式偏好（Preference）和生成器配置（GeneratorConfig）。
//!
//! - 偏好存储在 `<config_dir>/ai-flashcards/preferences.json`，
//!   由 `services::preference` 通过键值存储接口读写
//! - 生成器配置存储在 `<config_dir>/ai-flashcards/generator-config.json`，
//!   仅在启动时读取一次，缺失字段使用默认值

use serde::{Deserialize, Serialize};

/// 默认的抽认卡生成服务地址
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:5000/api/generate-flashcards";

/// 默认的 Ollama 生成接口地址
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";

/// 默认的 Ollama 模型名称
pub const DEFAULT_OLLAMA_MODEL: &str = "gemma3";

/// 深色模式偏好
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface Preference {
///   darkMode: boolean;
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preference {
    /// 是否启用深色模式；默认浅色
    pub dark_mode: bool,
}

/// 抽认卡的生成后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorBackend {
    /// 外部生成服务：POST `{subject, numCards}`，响应 `{flashcards}` 或 `{error}`
    #[default]
    Service,
    /// 直接调用本地 Ollama，由本应用负责提示词构造与结果解析
    Ollama,
}

/// 生成器配置
///
/// 所有字段均可省略，省略时使用默认值。示例：
/// ```json
/// {
///   "backend": "ollama",
///   "ollamaModel": "llama3",
///   "requestTimeoutSecs": 180
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorConfig {
    /// 使用哪种生成后端
    pub backend: GeneratorBackend,
    /// 外部生成服务的完整接口地址
    pub service_url: String,
    /// Ollama `/api/generate` 接口地址
    pub ollama_url: String,
    /// Ollama 模型名称（如 gemma3 / llama3 / mistral）
    pub ollama_model: String,
    /// 单次请求的总超时（秒）；本地模型生成较慢，默认放宽到 120 秒
    pub request_timeout_secs: u64,
    /// 建立连接的超时（秒）
    pub connect_timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: GeneratorBackend::Service,
            service_url: DEFAULT_SERVICE_URL.to_string(),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: DEFAULT_OLLAMA_MODEL.to_string(),
            request_timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}
