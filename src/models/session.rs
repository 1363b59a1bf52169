//! # 复习会话数据模型
//!
//! 定义生成请求的状态（RequestStatus）以及每次状态变化后
//! 返回给前端渲染的只读快照（SessionView）。
//!
//! 会话状态本身（`SessionState`）位于 `services::session`，
//! 只通过其转换方法修改；前端永远只拿到 `SessionView`。

use serde::Serialize;

/// 生成请求的生命周期状态
///
/// `Idle → Loading → (Idle | Error)`，错误状态在下一次提交时被覆盖。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    /// 空闲：没有进行中的请求，上一次请求（如有）已成功
    #[default]
    Idle,
    /// 加载中：已向生成服务发出请求，正在等待结果
    Loading,
    /// 失败：携带展示给用户的错误信息
    Error(String),
}

/// 请求状态的类别标识（序列化给前端）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Idle,
    Loading,
    Error,
}

impl RequestStatus {
    pub fn kind(&self) -> StatusKind {
        match self {
            RequestStatus::Idle => StatusKind::Idle,
            RequestStatus::Loading => StatusKind::Loading,
            RequestStatus::Error(_) => StatusKind::Error,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, RequestStatus::Loading)
    }

    /// 错误信息（仅 Error 状态下为 Some）
    pub fn error_message(&self) -> Option<&str> {
        match self {
            RequestStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// 卡片当前朝上的一面
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardSide {
    Question,
    Answer,
}

/// 会话视图快照
///
/// 每个会话类 command 的返回值，前端据此完整重绘页面：
/// 卡片计数（"Card 3 of 10"）、卡面文本、翻面标签、导航与生成按钮的可用状态、错误提示。
///
/// 对应前端 TypeScript 接口：
/// ```typescript
/// interface SessionView {
///   cardCount: number;
///   currentIndex: number;
///   isFlipped: boolean;
///   status: 'idle' | 'loading' | 'error';
///   errorMessage: string | null;
///   displayText: string | null;
///   side: 'Question' | 'Answer' | null;
///   canNavigate: boolean;
///   canGenerate: boolean;
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    /// 当前卡组中的卡片数量
    pub card_count: usize,
    /// 当前卡片下标（卡组为空时为 0）
    pub current_index: usize,
    /// 是否翻到答案面
    pub is_flipped: bool,
    /// 请求状态类别
    pub status: StatusKind,
    /// 错误信息：仅在 `status == error` 时存在
    pub error_message: Option<String>,
    /// 当前卡面文本：翻面时为答案，否则为问题；卡组为空时为 None
    pub display_text: Option<String>,
    /// 当前朝上的一面；卡组为空时为 None
    pub side: Option<CardSide>,
    /// 上一张/下一张/翻面是否可用（卡组非空）
    pub can_navigate: bool,
    /// 生成按钮是否可用（不在加载中）
    pub can_generate: bool,
}
