//! # 生成请求错误类型
//!
//! 每种错误的 `Display` 文本即是前端展示给用户的提示。
//! 所有错误都只终止当前这一次请求，用户可重新提交。

use serde::Serialize;
use thiserror::Error;

/// 生成请求失败的原因
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum GenerateError {
    /// 输入校验失败（主题为空、数量越界），不会发出网络请求
    #[error("{0}")]
    Validation(String),

    /// 生成服务在响应中返回了 `error` 字段
    #[error("API Error: {0}")]
    Api(String),

    /// 生成服务没有返回任何卡片
    #[error("No flashcards were generated. Try a different subject.")]
    EmptyResult,

    /// 网络或解码失败，携带底层错误信息
    #[error("Error: {0}")]
    Transport(String),

    /// 已有请求在进行中
    #[error("A generation request is already in progress")]
    Busy,
}

/// 拼接错误及其完整的 `source()` 链
///
/// reqwest 的顶层错误只有 "error sending request for url (...)"，
/// 真正的原因（如 "Connection refused"）在更深的 source 中。
fn describe_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        GenerateError::Transport(describe_chain(&e))
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Transport(e.to_string())
    }
}
