//! # 复习会话状态机
//!
//! `SessionState` 描述当前卡组、复习位置、翻面状态和请求状态，
//! 所有修改都通过本模块的转换方法完成：
//!
//! | 操作 | 前置条件 | 效果 |
//! |------|----------|------|
//! | `begin_generation` | 不在加载中、输入合法 | status = Loading，返回待发送的请求 |
//! | `finish_generation` | 处于加载中 | 成功：替换卡组、下标归零、取消翻面；失败：记录错误，卡组不变 |
//! | `next` / `previous` | 卡组非空 | 循环移动下标，取消翻面 |
//! | `toggle_flip` | 卡组非空 | 翻面 |
//!
//! 不变量：卡组非空时 `current_index < deck.len()`；任何导航或新卡组加载后 `is_flipped == false`。

use crate::models::card::{Card, Deck};
use crate::models::session::{CardSide, RequestStatus, SessionView};
use crate::services::error::GenerateError;

/// 单次请求允许的最少卡片数
pub const MIN_CARDS: u32 = 1;

/// 单次请求允许的最多卡片数
pub const MAX_CARDS: u32 = 20;

/// 一次已通过校验、等待发送的生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// 去除首尾空白后的主题
    pub subject: String,
    /// 期望生成的卡片数（已在 1..=20 内）
    pub num_cards: u32,
}

/// 复习会话状态
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    deck: Deck,
    current_index: usize,
    is_flipped: bool,
    status: RequestStatus,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_flipped(&self) -> bool {
        self.is_flipped
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    /// 当前卡片（卡组为空时为 None）
    pub fn current_card(&self) -> Option<&Card> {
        self.deck.get(self.current_index)
    }

    /// 当前卡面文本：翻面时为答案，否则为问题
    pub fn display_text(&self) -> Option<&str> {
        self.current_card().map(|card| {
            if self.is_flipped {
                card.answer.as_str()
            } else {
                card.question.as_str()
            }
        })
    }

    // ======== 生成请求 ========

    /// 开始一次生成请求
    ///
    /// 校验输入并将状态切换为 Loading。校验失败时记录错误状态，
    /// 调用方不得发出网络请求。已有请求进行中时返回 `Busy`，且不改变任何状态。
    ///
    /// # 错误
    /// - `Busy` - 已处于 Loading
    /// - `Validation` - 主题为空（或仅含空白），或卡片数不在 1..=20 内
    pub fn begin_generation(
        &mut self,
        subject: &str,
        num_cards: u32,
    ) -> Result<GenerationRequest, GenerateError> {
        if self.status.is_loading() {
            return Err(GenerateError::Busy);
        }

        let subject = subject.trim();
        let validation = if subject.is_empty() {
            Some("Please enter a subject".to_string())
        } else if !(MIN_CARDS..=MAX_CARDS).contains(&num_cards) {
            Some(format!(
                "Number of cards must be between {} and {}",
                MIN_CARDS, MAX_CARDS
            ))
        } else {
            None
        };

        if let Some(message) = validation {
            let err = GenerateError::Validation(message);
            self.status = RequestStatus::Error(err.to_string());
            return Err(err);
        }

        self.status = RequestStatus::Loading;
        Ok(GenerationRequest {
            subject: subject.to_string(),
            num_cards,
        })
    }

    /// 应用生成请求的结果
    ///
    /// 成功且非空时整体替换卡组；空结果视为 `EmptyResult` 错误。
    /// 任何错误都保留原卡组、下标和翻面状态。
    pub fn finish_generation(&mut self, outcome: Result<Deck, GenerateError>) {
        match outcome {
            Ok(cards) if !cards.is_empty() => {
                self.deck = cards;
                self.current_index = 0;
                self.is_flipped = false;
                self.status = RequestStatus::Idle;
            }
            Ok(_) => {
                self.status = RequestStatus::Error(GenerateError::EmptyResult.to_string());
            }
            Err(e) => {
                self.status = RequestStatus::Error(e.to_string());
            }
        }
    }

    // ======== 导航与翻面 ========

    /// 下一张：最后一张之后回到第一张
    pub fn next(&mut self) {
        let len = self.deck.len();
        if len == 0 {
            return;
        }
        self.is_flipped = false;
        self.current_index = (self.current_index + 1) % len;
    }

    /// 上一张：第一张之前是最后一张
    pub fn previous(&mut self) {
        let len = self.deck.len();
        if len == 0 {
            return;
        }
        self.is_flipped = false;
        self.current_index = if self.current_index == 0 {
            len - 1
        } else {
            self.current_index - 1
        };
    }

    /// 翻面：在问题与答案之间切换
    pub fn toggle_flip(&mut self) {
        if self.deck.is_empty() {
            return;
        }
        self.is_flipped = !self.is_flipped;
    }

    /// 生成前端渲染用的只读快照
    pub fn view(&self) -> SessionView {
        let has_cards = !self.deck().is_empty();
        let status = self.status();
        SessionView {
            card_count: self.deck().len(),
            current_index: self.current_index(),
            is_flipped: self.is_flipped(),
            status: status.kind(),
            error_message: status.error_message().map(str::to_string),
            display_text: self.display_text().map(str::to_string),
            side: has_cards.then(|| {
                if self.is_flipped() {
                    CardSide::Answer
                } else {
                    CardSide::Question
                }
            }),
            can_navigate: has_cards,
            can_generate: !status.is_loading(),
        }
    }
}
