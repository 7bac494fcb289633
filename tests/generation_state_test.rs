//! 出题任务状态机测试
//!
//! 状态迁移规则本身不依赖网络；涉及网络的用例使用一个
//! 连接必然被拒绝的本地地址（127.0.0.1:1），请求立即失败，
//! 正好用来验证失败路径和取消语义

use quizpro_client::error::{AppError, GenerationError};
use quizpro_client::models::{GenerationPreferences, ModelProvider, QuestionType};
use quizpro_client::workflow::generation_flow::GenerationJob;
use quizpro_client::workflow::{build_submission, GenerationFlow, JobStatus};
use quizpro_client::{ApiClient, Config};
use std::sync::Arc;

fn unreachable_flow() -> GenerationFlow {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    let client = Arc::new(ApiClient::new(&config).unwrap());
    GenerationFlow::new(client)
}

fn sample_submission() -> quizpro_client::Submission {
    let prefs = GenerationPreferences {
        model: ModelProvider::Gemini,
        question_type: QuestionType::MultipleChoice,
        question_count: 5,
    };
    build_submission("Photosynthesis converts light to energy.", vec![], prefs).unwrap()
}

#[test]
fn test_job_starts_submitted() {
    let job = GenerationJob::new(1);
    assert_eq!(job.status(), JobStatus::Submitted);
    assert!(!job.status().is_terminal());
}

#[test]
fn test_job_happy_path_transitions() {
    let mut job = GenerationJob::new(1);
    job.advance(JobStatus::Generating).unwrap();
    assert_eq!(job.status(), JobStatus::Generating);

    job.advance(JobStatus::Ready).unwrap();
    assert_eq!(job.status(), JobStatus::Ready);
    assert!(job.status().is_terminal());
}

#[test]
fn test_job_cannot_skip_generating() {
    let mut job = GenerationJob::new(1);
    assert!(job.advance(JobStatus::Ready).is_err());
    // 非法迁移不改变状态
    assert_eq!(job.status(), JobStatus::Submitted);
}

#[test]
fn test_terminal_states_are_frozen() {
    // Ready 冻结
    let mut job = GenerationJob::new(1);
    job.advance(JobStatus::Generating).unwrap();
    job.advance(JobStatus::Ready).unwrap();
    for next in [
        JobStatus::Submitted,
        JobStatus::Generating,
        JobStatus::Ready,
        JobStatus::Failed,
    ] {
        assert!(job.advance(next).is_err());
        assert_eq!(job.status(), JobStatus::Ready);
    }

    // Failed 同样冻结
    let mut job = GenerationJob::new(2);
    job.advance(JobStatus::Generating).unwrap();
    job.advance(JobStatus::Failed).unwrap();
    assert!(job.advance(JobStatus::Generating).is_err());
    assert_eq!(job.status(), JobStatus::Failed);
}

#[tokio::test]
async fn test_in_flight_flag_blocks_second_submit() {
    let flow = unreachable_flow();
    assert!(!flow.is_in_flight());

    let _handle = flow.submit(sample_submission()).unwrap();
    assert!(flow.is_in_flight());

    // 在途期间的再次提交必须被拒绝
    let second = flow.submit(sample_submission());
    assert!(matches!(
        second,
        Err(AppError::Generation(GenerationError::AlreadyInFlight))
    ));
}

#[tokio::test]
async fn test_failed_await_releases_in_flight() {
    let flow = unreachable_flow();
    let handle = flow.submit(sample_submission()).unwrap();

    // 连接被拒绝，任务到达 Failed
    let result = flow.await_result(handle).await;
    assert!(result.is_err());
    assert!(!flow.is_in_flight());

    // 终态任务不会被重试，但新的提交（新任务、新ID）是允许的
    let retry = flow.submit(sample_submission());
    assert!(retry.is_ok());
}

#[tokio::test]
async fn test_cancelled_result_is_discarded() {
    let flow = unreachable_flow();
    let handle = flow.submit(sample_submission()).unwrap();

    // 导航离开：在途结果作废
    flow.cancel_outstanding();
    assert!(!flow.is_in_flight());

    let result = flow.await_result(handle).await;
    assert!(matches!(
        result,
        Err(AppError::Generation(GenerationError::Cancelled { .. }))
    ));
}

#[tokio::test]
async fn test_job_ids_are_monotonic() {
    let flow = unreachable_flow();

    let first = flow.submit(sample_submission()).unwrap();
    let first_id = first.id;
    let _ = flow.await_result(first).await;

    let second = flow.submit(sample_submission()).unwrap();
    assert!(second.id > first_id);
}
