//! 会话守卫测试
//!
//! 使用连接必然失败的地址验证"宁可拒绝，不可放行"：
//! 传输层失败必须等同于未登录，绝不能放行受保护流程

use quizpro_client::error::{AppError, AuthError};
use quizpro_client::{ApiClient, Config, SessionGuard};
use std::sync::Arc;
use tokio_test::assert_ok;

fn unreachable_guard() -> SessionGuard {
    let config = Config {
        api_base_url: "http://127.0.0.1:1".to_string(),
        ..Config::default()
    };
    SessionGuard::new(Arc::new(ApiClient::new(&config).unwrap()))
}

#[tokio::test]
async fn test_transport_failure_resolves_to_unauthenticated() {
    let guard = unreachable_guard();

    let session = assert_ok!(guard.resolve_session().await);
    assert!(!session.authenticated);
    assert!(session.identity.is_none());

    // 解析结果已缓存，供本次导航内共享
    let cached = guard.current().expect("解析后应有缓存");
    assert!(!cached.authenticated);
}

#[tokio::test]
async fn test_require_session_returns_typed_auth_error() {
    // 场景 D: 未认证的调用方必须拿到 AuthError（由路由层映射为跳转登录页），
    // 受保护组件一概不执行，也就不可能发出 /api/quiz/start 或 /get_hint
    let guard = unreachable_guard();

    let result = guard.require_session().await;
    assert!(matches!(
        result,
        Err(AppError::Auth(AuthError::NotLoggedIn))
    ));
}

#[tokio::test]
async fn test_invalidate_drops_cached_resolution() {
    let guard = unreachable_guard();
    guard.resolve_session().await.unwrap();
    assert!(guard.current().is_some());

    // 导航边界：缓存不可跨越
    guard.invalidate();
    assert!(guard.current().is_none());
}

#[tokio::test]
async fn test_logout_clears_cache_even_when_api_fails() {
    let guard = unreachable_guard();
    guard.resolve_session().await.unwrap();
    assert!(guard.current().is_some());

    // 接口调用失败，但本地会话必须已被清除
    let result = guard.logout().await;
    assert!(result.is_err());
    assert!(guard.current().is_none());

    // 之后任何受保护入口都会再次走认证错误路径
    assert!(guard.require_session().await.is_err());
}
