//! 端到端集成测试
//!
//! 需要一个运行中的 QuizPro 后端和有效的测试账号，
//! 默认忽略，需要手动运行：cargo test -- --ignored

use quizpro_client::models::GenerationPreferences;
use quizpro_client::utils::logging;
use quizpro_client::workflow::{build_submission, GenerationFlow, QuizSession};
use quizpro_client::{ApiClient, Config, HintService, QuestionType, SessionGuard};
use std::sync::Arc;

fn live_client() -> Arc<ApiClient> {
    let config = Config::from_env();
    Arc::new(ApiClient::new(&config).expect("创建 API 客户端失败"))
}

#[tokio::test]
#[ignore] // 默认忽略，需要手动运行：cargo test -- --ignored
async fn test_login_and_resolve_session() {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();
    let guard = SessionGuard::new(live_client());

    // 登录并解析会话
    let session = guard
        .login(&config.email, &config.password)
        .await
        .expect("登录失败");

    assert!(session.authenticated);
    assert!(session.identity.is_some(), "应返回登录邮箱");
}

#[tokio::test]
#[ignore]
async fn test_unauthenticated_entry_is_rejected() {
    logging::init();

    // 全新客户端没有任何会话 Cookie
    let guard = SessionGuard::new(live_client());

    // 场景 D: 未登录的受保护入口必须返回认证错误，
    // 出题和提示组件因此根本不会被执行
    let result = guard.require_session().await;
    assert!(result.is_err(), "未登录时必须被拒绝");
}

#[tokio::test]
#[ignore]
async fn test_generate_quiz_end_to_end() {
    logging::init();

    let config = Config::from_env();
    let client = live_client();
    let guard = SessionGuard::new(client.clone());

    guard
        .login(&config.email, &config.password)
        .await
        .expect("登录失败");

    // 场景 A: 纯文本提交，5 道选择题
    let prefs =
        GenerationPreferences::parse("gemini", "multiple_choice", 5).expect("偏好解析失败");
    let submission = build_submission(
        "Photosynthesis converts light to energy.",
        vec![],
        prefs,
    )
    .expect("提交构建失败");

    let flow = GenerationFlow::new(client.clone());
    let handle = flow.submit(submission).expect("提交任务失败");
    let quiz = flow.await_result(handle).await.expect("出题失败");

    assert_eq!(quiz.len(), 5, "应生成 5 道题");
    assert!(quiz
        .questions
        .iter()
        .all(|q| q.answer_format == QuestionType::MultipleChoice));

    // 作答视图 + 提示获取
    let mut session = QuizSession::new();
    session.activate(quiz);

    let hints = HintService::new(client);
    let first = session.question(0).expect("取第一题失败");
    if first.hint_available {
        let hint = hints.get_hint(&first.id).await.expect("获取提示失败");
        assert!(!hint.is_empty());

        // 第二次读取走缓存
        let again = hints.get_hint(&first.id).await.unwrap();
        assert_eq!(hint, again);
        assert_eq!(hints.cached_count().await, 1);
    }
}
