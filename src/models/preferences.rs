use crate::error::{AppError, AppResult, ValidationError};

/// 题目数量下限
pub const MIN_QUESTION_COUNT: u32 = 1;
/// 题目数量上限
pub const MAX_QUESTION_COUNT: u32 = 50;

/// 出题模型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ModelProvider {
    /// Gemini
    Gemini,
    /// OpenAI
    Openai,
    /// DeepSeek
    Deepseek,
}

impl ModelProvider {
    /// 获取接口参数值（modelSelect 字段）
    pub fn as_str(self) -> &'static str {
        match self {
            ModelProvider::Gemini => "gemini",
            ModelProvider::Openai => "openai",
            ModelProvider::Deepseek => "deepseek",
        }
    }

    /// 尝试从字符串解析模型（不区分大小写）
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Some(ModelProvider::Gemini),
            "openai" => Some(ModelProvider::Openai),
            "deepseek" => Some(ModelProvider::Deepseek),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 题型枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum QuestionType {
    /// 选择题
    MultipleChoice,
    /// 简答题
    FreeResponse,
}

impl QuestionType {
    /// 获取接口参数值（questionType 字段）
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::FreeResponse => "free_response",
        }
    }

    /// 尝试从字符串解析题型
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "multiple_choice" => Some(QuestionType::MultipleChoice),
            "free_response" => Some(QuestionType::FreeResponse),
            _ => None,
        }
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 出题偏好
///
/// 随任务提交后不可再修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerationPreferences {
    /// 使用的模型
    pub model: ModelProvider,
    /// 题型
    pub question_type: QuestionType,
    /// 题目数量，范围 [1, 50]
    pub question_count: u32,
}

impl GenerationPreferences {
    /// 创建出题偏好（校验题目数量范围）
    pub fn new(
        model: ModelProvider,
        question_type: QuestionType,
        question_count: u32,
    ) -> AppResult<Self> {
        if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&question_count) {
            return Err(AppError::Validation(
                ValidationError::QuestionCountOutOfRange {
                    count: question_count,
                },
            ));
        }

        Ok(Self {
            model,
            question_type,
            question_count,
        })
    }

    /// 从接口参数字符串解析出题偏好
    ///
    /// # 参数
    /// - `model`: 模型名称（如 "gemini"）
    /// - `question_type`: 题型（如 "multiple_choice"）
    /// - `question_count`: 题目数量
    pub fn parse(model: &str, question_type: &str, question_count: u32) -> AppResult<Self> {
        let model = ModelProvider::from_str(model).ok_or_else(|| {
            AppError::Validation(ValidationError::UnknownModel {
                value: model.to_string(),
            })
        })?;

        let question_type = QuestionType::from_str(question_type).ok_or_else(|| {
            AppError::Validation(ValidationError::UnknownQuestionType {
                value: question_type.to_string(),
            })
        })?;

        Self::new(model, question_type, question_count)
    }
}
