//! # 生成器配置加载
//!
//! 启动时从 `<config_dir>/ai-flashcards/generator-config.json` 读取一次。
//! 文件不存在或解析失败时使用默认配置，不阻止应用启动。

use std::path::Path;

use crate::models::settings::GeneratorConfig;

/// 读取生成器配置
///
/// 缺失的字段取默认值（见 `GeneratorConfig::default`）。
/// 超时为 0 会让每个请求立即失败，因此被修正为默认值。
pub fn load_generator_config(path: &Path) -> GeneratorConfig {
    if !path.exists() {
        return GeneratorConfig::default();
    }

    let mut config = match std::fs::read_to_string(path)
        .map_err(|e| format!("读取生成器配置失败: {}", e))
        .and_then(|content| {
            serde_json::from_str::<GeneratorConfig>(&content)
                .map_err(|e| format!("解析生成器配置失败: {}", e))
        }) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("{}，使用默认配置", e);
            return GeneratorConfig::default();
        }
    };

    let defaults = GeneratorConfig::default();
    if config.request_timeout_secs == 0 {
        config.request_timeout_secs = defaults.request_timeout_secs;
    }
    if config.connect_timeout_secs == 0 {
        config.connect_timeout_secs = defaults.connect_timeout_secs;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::{DEFAULT_SERVICE_URL, GeneratorBackend};

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_generator_config(&dir.path().join("generator-config.json"));
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.service_url, DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator-config.json");
        std::fs::write(&path, r#"{"backend":"ollama","ollamaModel":"llama3"}"#).unwrap();

        let config = load_generator_config(&path);
        assert_eq!(config.backend, GeneratorBackend::Ollama);
        assert_eq!(config.ollama_model, "llama3");
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[test]
    fn test_invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator-config.json");
        std::fs::write(&path, "backend = ollama").unwrap();
        assert_eq!(load_generator_config(&path), GeneratorConfig::default());
    }

    #[test]
    fn test_zero_timeouts_are_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("generator-config.json");
        std::fs::write(&path, r#"{"requestTimeoutSecs":0,"connectTimeoutSecs":0}"#).unwrap();

        let config = load_generator_config(&path);
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.connect_timeout_secs, 10);
    }
}
