//! 提交构建与校验测试
//!
//! 校验全部在本地完成，这些用例不需要任何网络环境

use quizpro_client::error::{AppError, ValidationError};
use quizpro_client::models::{ContentSource, GenerationPreferences, ModelProvider, QuestionType};
use quizpro_client::workflow::{build_submission, FileInput};

fn prefs(count: u32) -> GenerationPreferences {
    GenerationPreferences {
        model: ModelProvider::Gemini,
        question_type: QuestionType::MultipleChoice,
        question_count: count,
    }
}

#[test]
fn test_build_with_text_only() {
    let submission = build_submission("Photosynthesis converts light to energy.", vec![], prefs(5))
        .expect("纯文本提交应该通过校验");

    assert!(submission.has_pasted_text());
    assert_eq!(submission.file_count(), 0);
    assert_eq!(submission.preferences.question_count, 5);
}

#[test]
fn test_build_with_files_only() {
    let files = vec![
        FileInput::new("chapter1.pptx", vec![1, 2, 3]),
        FileInput::new("notes.pdf", vec![4, 5, 6]),
    ];
    let submission = build_submission("", files, prefs(10)).expect("纯文件提交应该通过校验");

    assert!(!submission.has_pasted_text());
    assert_eq!(submission.file_count(), 2);
}

#[test]
fn test_build_with_text_and_files() {
    let files = vec![FileInput::new("slides.pptx", vec![0u8; 16])];
    let submission =
        build_submission("some pasted notes", files, prefs(20)).expect("混合提交应该通过校验");

    assert!(submission.has_pasted_text());
    assert_eq!(submission.file_count(), 1);
    assert_eq!(submission.sources.len(), 2);
}

#[test]
fn test_empty_submission_rejected_regardless_of_preferences() {
    // 无论偏好取什么值，空内容都必须被拒绝
    for count in [1, 25, 50] {
        let result = build_submission("", vec![], prefs(count));
        assert!(matches!(
            result,
            Err(AppError::Validation(ValidationError::EmptySubmission))
        ));
    }
}

#[test]
fn test_whitespace_only_text_counts_as_empty() {
    let result = build_submission("   \n\t  ", vec![], prefs(5));
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::EmptySubmission))
    ));
}

#[test]
fn test_question_count_zero_rejected() {
    // 场景 B: numQuestions = 0 必须在本地失败，不可能触达出题接口
    let result = build_submission("valid content", vec![], prefs(0));
    assert!(matches!(
        result,
        Err(AppError::Validation(
            ValidationError::QuestionCountOutOfRange { count: 0 }
        ))
    ));
}

#[test]
fn test_question_count_bounds() {
    assert!(build_submission("content", vec![], prefs(1)).is_ok());
    assert!(build_submission("content", vec![], prefs(50)).is_ok());
    assert!(build_submission("content", vec![], prefs(51)).is_err());
}

#[test]
fn test_preferences_parse_valid_enums() {
    let prefs = GenerationPreferences::parse("gemini", "multiple_choice", 20).unwrap();
    assert_eq!(prefs.model, ModelProvider::Gemini);
    assert_eq!(prefs.question_type, QuestionType::MultipleChoice);

    let prefs = GenerationPreferences::parse("DeepSeek", "free_response", 1).unwrap();
    assert_eq!(prefs.model, ModelProvider::Deepseek);
    assert_eq!(prefs.question_type, QuestionType::FreeResponse);
}

#[test]
fn test_preferences_parse_unknown_model() {
    let result = GenerationPreferences::parse("claude", "multiple_choice", 5);
    assert!(matches!(
        result,
        Err(AppError::Validation(ValidationError::UnknownModel { .. }))
    ));
}

#[test]
fn test_preferences_parse_unknown_question_type() {
    let result = GenerationPreferences::parse("gemini", "true_false", 5);
    assert!(matches!(
        result,
        Err(AppError::Validation(
            ValidationError::UnknownQuestionType { .. }
        ))
    ));
}

#[test]
fn test_mime_guessing() {
    assert_eq!(
        ContentSource::guess_mime("lecture.pdf"),
        "application/pdf"
    );
    assert_eq!(
        ContentSource::guess_mime("Slides.PPTX"),
        "application/vnd.openxmlformats-officedocument.presentationml.presentation"
    );
    assert_eq!(
        ContentSource::guess_mime("unknown.bin"),
        "application/octet-stream"
    );
}

#[test]
fn test_into_form_packages_all_sources() {
    let files = vec![FileInput::new("notes.docx", vec![1, 2, 3])];
    let submission = build_submission("pasted", files, prefs(5)).unwrap();

    // 打包成功即说明所有分部的 MIME 类型都合法
    submission.into_form().expect("multipart 打包应该成功");
}
