//! 提交构建器 - 流程层
//!
//! 核心职责：把"粘贴文本 + 上传文件 + 出题偏好"聚合成一个
//! 规范化的 Submission
//!
//! 只做形状校验和打包，不检查内容本身；校验全部在本地完成，
//! 构建失败时保证没有发出任何网络请求

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::preferences::{
    GenerationPreferences, MAX_QUESTION_COUNT, MIN_QUESTION_COUNT,
};
use crate::models::submission::{ContentSource, Submission};
use tracing::debug;

/// 待上传的文件输入
#[derive(Debug, Clone)]
pub struct FileInput {
    /// 文件名
    pub name: String,
    /// 文件内容
    pub bytes: Vec<u8>,
}

impl FileInput {
    /// 创建文件输入
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// 构建提交载荷
///
/// # 参数
/// - `pasted_text`: 粘贴文本（可为空）
/// - `files`: 上传文件列表（可为空）
/// - `preferences`: 出题偏好
///
/// # 返回
/// 校验通过时返回规范化的 Submission；校验规则：
/// - 题目数量在 [1, 50] 内
/// - 至少一个有效内容来源（含非空白字符的文本，或 ≥1 个文件）
pub fn build_submission(
    pasted_text: &str,
    files: Vec<FileInput>,
    preferences: GenerationPreferences,
) -> AppResult<Submission> {
    // 偏好字段允许被直接构造，这里统一复查数量范围
    if !(MIN_QUESTION_COUNT..=MAX_QUESTION_COUNT).contains(&preferences.question_count) {
        return Err(AppError::Validation(
            ValidationError::QuestionCountOutOfRange {
                count: preferences.question_count,
            },
        ));
    }

    let has_text = !pasted_text.trim().is_empty();
    if !has_text && files.is_empty() {
        return Err(AppError::Validation(ValidationError::EmptySubmission));
    }

    let mut sources = Vec::with_capacity(files.len() + 1);

    if has_text {
        sources.push(ContentSource::PastedText(pasted_text.to_string()));
    }

    for file in files {
        let content_type = ContentSource::guess_mime(&file.name).to_string();
        sources.push(ContentSource::UploadedFile {
            name: file.name,
            bytes: file.bytes,
            content_type,
        });
    }

    debug!(
        "提交构建完成: 文本={} 文件数={} 模型={} 题型={} 数量={}",
        has_text,
        sources
            .iter()
            .filter(|s| matches!(s, ContentSource::UploadedFile { .. }))
            .count(),
        preferences.model,
        preferences.question_type,
        preferences.question_count
    );

    Ok(Submission {
        preferences,
        sources,
    })
}
