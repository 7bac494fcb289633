//! 出题请求文件模型
//!
//! 一个 TOML 文件描述一次出题请求：内容来源 + 出题偏好

/// 出题请求文件
///
/// TOML 示例：
/// ```toml
/// pasted_text = "Photosynthesis converts light to energy."
/// files = ["slides/chapter1.pptx"]
/// model = "gemini"
/// question_type = "multiple_choice"
/// num_questions = 5
/// ```
#[derive(Debug, Clone, serde::Deserialize)]
pub struct QuizRequestFile {
    /// 粘贴文本
    #[serde(default)]
    pub pasted_text: Option<String>,
    /// 待上传的文件路径列表
    #[serde(default)]
    pub files: Vec<String>,
    /// 模型名称
    pub model: String,
    /// 题型
    pub question_type: String,
    /// 题目数量
    pub num_questions: u32,
    /// 来源文件路径（加载时填充，不在 TOML 中）
    #[serde(skip)]
    pub file_path: Option<String>,
}
