//! # 抽认卡数据模型

use serde::{Deserialize, Serialize};

/// 单张抽认卡：一个问题与其答案
///
/// 由生成服务返回，接收后不再修改。
///
/// 对应生成服务响应中 `flashcards` 数组的元素：
/// ```json
/// { "question": "What is X?", "answer": "Explanation of X" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// 正面：问题文本
    pub question: String,
    /// 背面：答案文本
    pub answer: String,
}

#[cfg(test)]
impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// 卡组：当前加载用于复习的有序抽认卡序列
///
/// 每次生成成功后整体替换，从不局部修改。
pub type Deck = Vec<Card>;
