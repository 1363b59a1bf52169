//! # 复习会话控制器
//!
//! 把会话状态机与生成器串起来，完成一次完整的生成往返：
//! 1. 加锁，校验输入并切换到 Loading（得到 `GenerationRequest`）
//! 2. 释放锁，等待生成器返回
//! 3. 再次加锁，应用结果
//!
//! 锁从不跨越 `.await` 持有；"同一时刻最多一个请求"由 Loading 状态检查保证。

use std::sync::{Mutex, MutexGuard};

use crate::models::session::SessionView;
use crate::services::error::GenerateError;
use crate::services::generator::FlashcardGenerator;
use crate::services::session::SessionState;

/// 获取会话锁；锁被污染时仍取出内部状态（状态转换本身不会 panic 到一半）
fn lock_session(session: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// 对会话执行一次同步转换并返回新的视图
pub fn apply(
    session: &Mutex<SessionState>,
    transition: impl FnOnce(&mut SessionState),
) -> SessionView {
    let mut state = lock_session(session);
    transition(&mut state);
    state.view()
}

/// 当前会话视图
pub fn snapshot(session: &Mutex<SessionState>) -> SessionView {
    lock_session(session).view()
}

/// 执行一次抽认卡生成
///
/// 校验失败、服务报错、空结果、网络失败都会体现在返回视图的错误状态中，
/// 此时卡组保持不变。
///
/// # 错误
/// 仅当已有请求进行中时返回 `GenerateError::Busy`，此时状态不变且不发出请求。
pub async fn generate<G: FlashcardGenerator>(
    session: &Mutex<SessionState>,
    generator: &G,
    subject: &str,
    num_cards: u32,
) -> Result<SessionView, GenerateError> {
    let request = {
        let mut state = lock_session(session);
        match state.begin_generation(subject, num_cards) {
            Ok(request) => request,
            Err(GenerateError::Busy) => return Err(GenerateError::Busy),
            Err(e) => {
                log::info!("生成请求未通过校验: {}", e);
                return Ok(state.view());
            }
        }
    };

    log::info!(
        "开始生成抽认卡: subject={:?}, num_cards={}",
        request.subject,
        request.num_cards
    );
    let outcome = generator.generate(&request).await;

    match &outcome {
        Ok(cards) => log::info!("生成完成，共 {} 张卡片", cards.len()),
        Err(e) => log::warn!("生成失败: {}", e),
    }

    let mut state = lock_session(session);
    state.finish_generation(outcome);
    Ok(state.view())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::models::card::Deck;
    use crate::models::session::{CardSide, StatusKind};
    use crate::services::generator::interpret_service_response;
    use crate::services::session::GenerationRequest;

    /// 返回固定响应体并记录调用次数的假生成器
    struct FakeGenerator {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl FakeGenerator {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FlashcardGenerator for FakeGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<Deck, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            interpret_service_response(serde_json::from_str(self.body)?)
        }
    }

    /// 在收到信号前一直挂起的生成器，用于构造"请求进行中"的场景
    struct BlockingGenerator {
        release: tokio::sync::Notify,
        calls: AtomicUsize,
    }

    impl FlashcardGenerator for BlockingGenerator {
        async fn generate(&self, _request: &GenerationRequest) -> Result<Deck, GenerateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.release.notified().await;
            Ok(vec![crate::models::card::Card::new("Q", "A")])
        }
    }

    const ONE_CARD: &str = r#"{"flashcards":[{"question":"Q1","answer":"A1"}]}"#;

    #[tokio::test]
    async fn test_successful_generation() {
        let session = Mutex::new(SessionState::new());
        let generator = FakeGenerator::new(ONE_CARD);

        let view = generate(&session, &generator, "Rust", 1).await.unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(view.card_count, 1);
        assert_eq!(view.current_index, 0);
        assert!(!view.is_flipped);
        assert_eq!(view.status, StatusKind::Idle);
        assert_eq!(view.display_text.as_deref(), Some("Q1"));

        let view = apply(&session, SessionState::toggle_flip);
        assert_eq!(view.display_text.as_deref(), Some("A1"));
        assert_eq!(view.side, Some(CardSide::Answer));
    }

    #[tokio::test]
    async fn test_empty_subject_never_calls_generator() {
        let session = Mutex::new(SessionState::new());
        let generator = FakeGenerator::new(ONE_CARD);

        let view = generate(&session, &generator, "", 5).await.unwrap();
        assert_eq!(generator.calls(), 0);
        assert_eq!(view.status, StatusKind::Error);
        assert_eq!(view.error_message.as_deref(), Some("Please enter a subject"));
    }

    #[tokio::test]
    async fn test_api_error_keeps_deck() {
        let session = Mutex::new(SessionState::new());
        generate(&session, &FakeGenerator::new(ONE_CARD), "Rust", 1)
            .await
            .unwrap();

        let view = generate(&session, &FakeGenerator::new(r#"{"error":"bad subject"}"#), "??", 3)
            .await
            .unwrap();
        assert_eq!(view.status, StatusKind::Error);
        assert!(view.error_message.unwrap().contains("bad subject"));
        assert_eq!(view.card_count, 1);
        assert_eq!(view.display_text.as_deref(), Some("Q1"));
    }

    #[tokio::test]
    async fn test_empty_result_and_decode_failure() {
        let session = Mutex::new(SessionState::new());

        let view = generate(&session, &FakeGenerator::new(r#"{"flashcards":[]}"#), "Rust", 3)
            .await
            .unwrap();
        assert_eq!(
            view.error_message.as_deref(),
            Some("No flashcards were generated. Try a different subject.")
        );

        let view = generate(&session, &FakeGenerator::new("<html>"), "Rust", 3)
            .await
            .unwrap();
        assert!(view.error_message.unwrap().starts_with("Error: "));
        assert!(view.can_generate);
    }

    #[tokio::test]
    async fn test_second_request_while_loading_is_rejected() {
        let session = Arc::new(Mutex::new(SessionState::new()));
        let blocking = Arc::new(BlockingGenerator {
            release: tokio::sync::Notify::new(),
            calls: AtomicUsize::new(0),
        });

        let first = {
            let session = Arc::clone(&session);
            let blocking = Arc::clone(&blocking);
            async move { generate(&session, blocking.as_ref(), "Rust", 1).await }
        };
        let second = {
            let session = Arc::clone(&session);
            let blocking = Arc::clone(&blocking);
            async move {
                // 等第一个请求进入 Loading
                tokio::task::yield_now().await;
                assert!(!snapshot(&session).can_generate);
                let result = generate(&session, blocking.as_ref(), "Other", 2).await;
                blocking.release.notify_one();
                result
            }
        };

        let (first, second) = tokio::join!(first, second);
        assert_eq!(second, Err(GenerateError::Busy));
        assert_eq!(blocking.calls.load(Ordering::SeqCst), 1);

        let view = first.unwrap();
        assert_eq!(view.card_count, 1);
        assert_eq!(view.status, StatusKind::Idle);
    }
}
