//! 测验会话 - 流程层
//!
//! 持有当前作答的测验，按索引提供只读访问；
//! 离开测验页即丢弃，不做任何持久化

use crate::error::{AppError, AppResult, QuizError};
use crate::models::quiz::{Question, Quiz};
use tracing::info;

/// 测验会话
///
/// 对 Quiz 只读，没有任何修改题目的方法
#[derive(Debug, Default)]
pub struct QuizSession {
    quiz: Option<Quiz>,
}

impl QuizSession {
    /// 创建空会话
    pub fn new() -> Self {
        Self { quiz: None }
    }

    /// 激活一份新生成的测验（替换旧的）
    pub fn activate(&mut self, quiz: Quiz) {
        info!("🎯 激活测验: 共 {} 道题", quiz.len());
        self.quiz = Some(quiz);
    }

    /// 当前测验
    ///
    /// # 返回
    /// 没有任务到达 Ready 时返回 NoActiveQuiz
    pub fn current(&self) -> AppResult<&Quiz> {
        self.quiz
            .as_ref()
            .ok_or(AppError::Quiz(QuizError::NoActiveQuiz))
    }

    /// 按索引取题目（从 0 开始）
    ///
    /// # 参数
    /// - `index`: 题目索引，范围 [0, len)
    pub fn question(&self, index: usize) -> AppResult<&Question> {
        let quiz = self.current()?;
        quiz.questions
            .get(index)
            .ok_or(AppError::Quiz(QuizError::IndexOutOfRange {
                index,
                len: quiz.len(),
            }))
    }

    /// 题目数量（无激活测验时为 0）
    pub fn len(&self) -> usize {
        self.quiz.as_ref().map(|q| q.len()).unwrap_or(0)
    }

    /// 是否有激活的测验
    pub fn is_active(&self) -> bool {
        self.quiz.is_some()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 丢弃当前测验（导航离开）
    pub fn clear(&mut self) {
        self.quiz = None;
    }
}
