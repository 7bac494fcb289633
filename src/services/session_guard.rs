//! 会话守卫 - 业务能力层
//!
//! 职责：
//! - 解析并缓存当前导航内的登录状态
//! - 未登录时返回类型化的认证错误，由路由层映射为跳转登录页
//! - 提供登录 / 注销能力
//! - 不关心下游流程

use crate::clients::ApiClient;
use crate::error::{AppError, AppResult, AuthError};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// 已登录用户引用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRef {
    /// 登录邮箱
    pub email: String,
}

/// 会话状态
///
/// 只由会话守卫创建和失效，其他组件只读。
/// 跨越一次硬导航后不可继续信任，必须重新解析
#[derive(Debug, Clone)]
pub struct Session {
    /// 用户身份（未登录时为 None）
    pub identity: Option<UserRef>,
    /// 是否已认证
    pub authenticated: bool,
}

impl Session {
    /// 未认证会话
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            authenticated: false,
        }
    }

    /// 已认证会话
    pub fn authenticated(email: Option<String>) -> Self {
        Self {
            identity: email.map(|email| UserRef { email }),
            authenticated: true,
        }
    }
}

/// 会话守卫
///
/// 所有受保护的入口在进入时调用 resolve_session / require_session；
/// 同一次导航内的多个视图共享一次解析结果，避免各自重复请求
pub struct SessionGuard {
    client: Arc<ApiClient>,
    cached: Mutex<Option<Session>>,
}

impl SessionGuard {
    /// 创建新的会话守卫
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cached: Mutex::new(None),
        }
    }

    /// 解析当前会话状态
    ///
    /// 每次调用都向服务端确认一次，并缓存结果供本次导航内读取。
    /// 传输层失败等同于未登录（宁可拒绝，不可放行）
    pub async fn resolve_session(&self) -> AppResult<Session> {
        let session = match self.client.fetch_user().await {
            Ok(status) if status.logged_in => {
                debug!("会话有效: {:?}", status.email);
                Session::authenticated(status.email)
            }
            Ok(_) => {
                debug!("服务端报告未登录");
                Session::anonymous()
            }
            Err(e) => {
                warn!("会话解析失败，按未登录处理: {}", e);
                Session::anonymous()
            }
        };

        *self.cached.lock().unwrap() = Some(session.clone());
        Ok(session)
    }

    /// 要求一个已认证的会话
    ///
    /// # 返回
    /// 未认证时返回 AuthError::NotLoggedIn，调用方（路由层）
    /// 负责把它映射为跳转登录页；本守卫不感知任何导航机制
    pub async fn require_session(&self) -> AppResult<Session> {
        let session = self.resolve_session().await?;
        if !session.authenticated {
            return Err(AppError::Auth(AuthError::NotLoggedIn));
        }
        Ok(session)
    }

    /// 登录
    ///
    /// 登录成功后重新解析会话，保证缓存与服务端一致
    pub async fn login(&self, email: &str, password: &str) -> AppResult<Session> {
        self.client.login(email, password).await?;
        info!("✓ 登录成功: {}", email);

        let session = self.resolve_session().await?;
        if !session.authenticated {
            // 登录接口成功但会话仍未生效，按认证失败处理
            return Err(AppError::Auth(AuthError::NotLoggedIn));
        }
        Ok(session)
    }

    /// 注销
    ///
    /// 无论接口是否成功，本地缓存的会话都会被清除；
    /// 下游组件应随之丢弃所有任务/测验状态
    pub async fn logout(&self) -> AppResult<()> {
        let result = self.client.logout().await;
        *self.cached.lock().unwrap() = None;

        match result {
            Ok(()) => {
                info!("✓ 已注销");
                Ok(())
            }
            Err(e) => {
                warn!("注销接口调用失败（本地会话已清除）: {}", e);
                Err(e)
            }
        }
    }

    /// 读取本次导航内缓存的会话（不发请求）
    pub fn current(&self) -> Option<Session> {
        self.cached.lock().unwrap().clone()
    }

    /// 丢弃缓存的会话解析结果（导航边界）
    pub fn invalidate(&self) {
        *self.cached.lock().unwrap() = None;
    }
}
