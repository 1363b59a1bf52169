//! # 抽认卡生成服务
//!
//! 定义 `FlashcardGenerator` 接口及其两种 HTTP 实现：
//! - `ServiceGenerator` - 调用外部抽认卡生成服务（默认）
//! - `OllamaGenerator` - 直接调用本地 Ollama 模型，由本应用负责构造提示词并解析输出
//!
//! 两种实现都只负责"发出一次请求并把结果解释为卡片列表或错误"，
//! 会话状态的切换由 `services::review` 完成。
//!
//! ## 超时
//! 所有 HTTP 客户端都显式设置了连接超时与总超时（见 `GeneratorConfig`），
//! 不做自动重试，失败后由用户重新提交。

use std::future::Future;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::card::{Card, Deck};
use crate::models::settings::{GeneratorBackend, GeneratorConfig};
use crate::services::error::GenerateError;
use crate::services::session::GenerationRequest;

/// 抽认卡生成接口
///
/// 每次调用对应一次网络请求。返回的卡组可能为空，
/// 空结果由会话状态机统一解释为 `EmptyResult`。
pub trait FlashcardGenerator {
    fn generate(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<Deck, GenerateError>> + Send;
}

/// 根据配置构建 HTTP 客户端
fn build_client(config: &GeneratorConfig) -> Result<reqwest::Client, String> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
        .map_err(|e| format!("创建 HTTP 客户端失败: {}", e))
}

// ============ 外部生成服务 ============

/// 生成服务请求体：`{"subject": "...", "numCards": 5}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ServiceRequest<'a> {
    subject: &'a str,
    num_cards: u32,
}

/// 生成服务响应体：成功时含 `flashcards`，失败时含 `error`
#[derive(Debug, Default, Deserialize)]
pub struct ServiceResponse {
    #[serde(default)]
    pub flashcards: Option<Vec<Card>>,
    #[serde(default)]
    pub error: Option<String>,
}

/// 将生成服务的响应体解释为卡组或错误
///
/// - 非空的 `error` 字段优先，视为 `Api` 错误
/// - `flashcards` 缺失或为空数组时返回 `EmptyResult`
pub fn interpret_service_response(response: ServiceResponse) -> Result<Deck, GenerateError> {
    if let Some(message) = response.error.filter(|m| !m.is_empty()) {
        return Err(GenerateError::Api(message));
    }

    match response.flashcards {
        Some(cards) if !cards.is_empty() => Ok(cards),
        _ => Err(GenerateError::EmptyResult),
    }
}

/// 外部抽认卡生成服务客户端
pub struct ServiceGenerator {
    client: reqwest::Client,
    endpoint: String,
}

impl ServiceGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, String> {
        Ok(Self {
            client: build_client(config)?,
            endpoint: config.service_url.clone(),
        })
    }
}

impl FlashcardGenerator for ServiceGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, GenerateError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ServiceRequest {
                subject: &request.subject,
                num_cards: request.num_cards,
            })
            .send()
            .await?;

        // 服务在 4xx/5xx 时同样以 `{error}` 报告原因，因此先尝试解析响应体
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<ServiceResponse>(&body) {
            Ok(parsed) => interpret_service_response(parsed),
            Err(_) if !status.is_success() => {
                Err(GenerateError::Transport(format!("HTTP {}", status)))
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============ Ollama 直连 ============

/// Ollama `/api/generate` 请求体
#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

/// Ollama `/api/generate` 非流式响应体（只关心生成文本）
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    #[serde(default)]
    response: String,
}

/// 匹配模型输出首尾的 Markdown 代码块标记（```` ``` ```` 或 ```` ```json ````）
static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^```(?:json)?\s*|\s*```$").unwrap());

/// 构造要求模型输出 JSON 数组的提示词
pub fn build_prompt(subject: &str, num_cards: u32) -> String {
    format!(
        "Generate {num_cards} flashcards about '{subject}' in JSON array format. \
         Each flashcard should look like this: \
         {{\"question\": \"What is X?\", \"answer\": \"Explanation of X\"}}. \
         Return only raw JSON, without formatting it inside triple backticks or as markdown."
    )
}

/// 去除模型输出首尾的代码块标记
///
/// 模型即使被要求输出纯 JSON，仍常常包一层 ```` ```json ... ``` ````。
/// 只有当文本以 ```` ``` ```` 开头时才处理，其余情况仅去除首尾空白。
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let mut start = 0;
    let mut end = trimmed.len();
    for m in CODE_FENCE_RE.find_iter(trimmed) {
        if m.start() == 0 {
            start = m.end();
        } else if m.end() == trimmed.len() {
            end = m.start();
        }
    }

    if start >= end {
        ""
    } else {
        trimmed[start..end].trim()
    }
}

/// 将模型生成的文本解析为卡组，并截断到请求的数量
pub fn parse_model_output(raw: &str, num_cards: u32) -> Result<Deck, GenerateError> {
    let mut cards: Deck = serde_json::from_str(strip_code_fence(raw))?;
    cards.truncate(num_cards as usize);
    Ok(cards)
}

/// 本地 Ollama 客户端
pub struct OllamaGenerator {
    client: reqwest::Client,
    url: String,
    model: String,
}

impl OllamaGenerator {
    pub fn new(config: &GeneratorConfig) -> Result<Self, String> {
        Ok(Self {
            client: build_client(config)?,
            url: config.ollama_url.clone(),
            model: config.ollama_model.clone(),
        })
    }
}

impl FlashcardGenerator for OllamaGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, GenerateError> {
        let response = self
            .client
            .post(&self.url)
            .json(&OllamaRequest {
                model: &self.model,
                prompt: build_prompt(&request.subject, request.num_cards),
                stream: false,
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        log::debug!("Ollama 响应状态: {}", status);

        if status != reqwest::StatusCode::OK {
            return Err(GenerateError::Api(format!("Ollama Error: {}", body)));
        }

        let parsed: OllamaResponse = serde_json::from_str(&body)?;
        parse_model_output(&parsed.response, request.num_cards)
    }
}

// ============ 按配置分发 ============

/// 按配置选定的生成器
pub enum Generator {
    Service(ServiceGenerator),
    Ollama(OllamaGenerator),
}

impl Generator {
    /// 根据配置构建生成器
    ///
    /// # 错误
    /// HTTP 客户端创建失败时返回错误信息
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, String> {
        Ok(match config.backend {
            GeneratorBackend::Service => Generator::Service(ServiceGenerator::new(config)?),
            GeneratorBackend::Ollama => Generator::Ollama(OllamaGenerator::new(config)?),
        })
    }
}

impl FlashcardGenerator for Generator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Deck, GenerateError> {
        match self {
            Generator::Service(g) => g.generate(request).await,
            Generator::Ollama(g) => g.generate(request).await,
        }
    }
}
