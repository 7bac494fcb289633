//! 提交载荷模型
//!
//! 一个 Submission 由出题偏好和至少一个内容来源组成，
//! 由 workflow::submission_builder 负责校验和构建

use crate::error::{AppError, AppResult};
use crate::models::preferences::GenerationPreferences;
use reqwest::multipart::{Form, Part};

/// 内容来源
///
/// 服务端的出题引擎负责把所有来源的内容逻辑拼接，
/// 客户端只做打包，不检查内容本身
#[derive(Debug, Clone)]
pub enum ContentSource {
    /// 粘贴文本（保证含非空白字符）
    PastedText(String),
    /// 上传文件
    UploadedFile {
        /// 文件名
        name: String,
        /// 文件内容
        bytes: Vec<u8>,
        /// 声明的 MIME 类型
        content_type: String,
    },
}

impl ContentSource {
    /// 根据文件扩展名推断 MIME 类型
    ///
    /// 覆盖前端允许上传的文件类型（pptx / pdf / docx / xlsx），
    /// 其余一律按二进制流处理
    pub fn guess_mime(file_name: &str) -> &'static str {
        let ext = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

/// 规范化后的提交载荷
///
/// 只能通过 submission_builder 构建，构建成功即满足全部跨字段不变量
#[derive(Debug, Clone)]
pub struct Submission {
    /// 出题偏好
    pub preferences: GenerationPreferences,
    /// 内容来源列表（至少一个）
    pub sources: Vec<ContentSource>,
}

impl Submission {
    /// 打包为 multipart 表单
    ///
    /// 字段名与服务端约定保持一致：
    /// - `pastedText`: 粘贴文本（即使为空也会携带）
    /// - `modelSelect` / `questionType` / `numQuestions`: 偏好标量字段
    /// - `contentFiles`: 每个上传文件一个二进制分部
    pub fn into_form(self) -> AppResult<Form> {
        let mut pasted_text = String::new();
        let mut form = Form::new();

        for source in self.sources {
            match source {
                ContentSource::PastedText(text) => {
                    pasted_text = text;
                }
                ContentSource::UploadedFile {
                    name,
                    bytes,
                    content_type,
                } => {
                    let part = Part::bytes(bytes)
                        .file_name(name.clone())
                        .mime_str(&content_type)
                        .map_err(|e| {
                            AppError::Other(format!("文件 {} 的 MIME 类型无效: {}", name, e))
                        })?;
                    form = form.part("contentFiles", part);
                }
            }
        }

        form = form
            .text("pastedText", pasted_text)
            .text("modelSelect", self.preferences.model.as_str())
            .text("questionType", self.preferences.question_type.as_str())
            .text("numQuestions", self.preferences.question_count.to_string());

        Ok(form)
    }

    /// 上传文件数量
    pub fn file_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| matches!(s, ContentSource::UploadedFile { .. }))
            .count()
    }

    /// 是否包含粘贴文本
    pub fn has_pasted_text(&self) -> bool {
        self.sources
            .iter()
            .any(|s| matches!(s, ContentSource::PastedText(_)))
    }
}
