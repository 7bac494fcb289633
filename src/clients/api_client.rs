/// QuizPro 后端 API 客户端
///
/// 封装所有 HTTP 调用；会话凭证通过 Cookie 自动携带，
/// 任何接口返回 401/403 都统一映射为认证错误
use crate::config::Config;
use crate::error::{AppError, ApiError, AppResult, AuthError, GenerationError};
use reqwest::multipart::Form;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// /api/user 的响应
#[derive(Debug, Clone, serde::Deserialize)]
pub struct UserStatus {
    /// 是否已登录
    pub logged_in: bool,
    /// 登录邮箱
    #[serde(default)]
    pub email: Option<String>,
}

/// QuizPro API 客户端
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的 API 客户端
    ///
    /// 启用 Cookie 存储，登录后服务端下发的会话 Cookie
    /// 会自动附加到后续所有请求
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .connect_timeout(Duration::from_secs(30))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Other(format!("无法构建 HTTP 客户端: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 查询当前登录状态
    ///
    /// # 返回
    /// 非 2xx 响应一律视为未登录（不作为错误返回）；
    /// 传输层失败才返回 Err，由会话守卫决定如何兜底
    pub async fn fetch_user(&self) -> AppResult<UserStatus> {
        let endpoint = "/api/user";
        let resp = self.http.get(self.url(endpoint)).send().await?;

        if !resp.status().is_success() {
            debug!("GET {} 返回 {}, 视为未登录", endpoint, resp.status());
            return Ok(UserStatus {
                logged_in: false,
                email: None,
            });
        }

        let status: UserStatus = resp.json().await?;
        Ok(status)
    }

    /// 登录
    ///
    /// # 参数
    /// - `email`: 邮箱
    /// - `password`: 密码
    ///
    /// 成功时服务端通过 Set-Cookie 下发会话凭证
    pub async fn login(&self, email: &str, password: &str) -> AppResult<()> {
        let endpoint = "/api/login";
        let resp = self
            .http
            .post(self.url(endpoint))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if resp.status().is_success() {
            debug!("登录成功: {}", email);
            return Ok(());
        }

        let message = extract_message(resp).await.unwrap_or_else(|| "登录失败".to_string());
        Err(AppError::Auth(AuthError::LoginFailed { message }))
    }

    /// 注销会话
    pub async fn logout(&self) -> AppResult<()> {
        let endpoint = "/api/logout";
        let resp = self.http.post(self.url(endpoint)).send().await?;

        if resp.status().is_success() {
            return Ok(());
        }

        // 注销失败时本地会话照样会被丢弃，这里只报告接口错误
        Err(AppError::Api(ApiError::BadResponse {
            endpoint: endpoint.to_string(),
            status: resp.status().as_u16(),
            message: extract_message(resp).await,
        }))
    }

    /// 提交出题请求
    ///
    /// # 参数
    /// - `form`: 由 Submission 打包好的 multipart 表单
    ///
    /// # 返回
    /// 成功时返回测验响应体（raw 文本或结构化题目列表），
    /// 401/403 映射为认证错误，其余非 2xx 映射为出题被拒绝
    pub async fn start_quiz(&self, form: Form) -> AppResult<Value> {
        let endpoint = "/api/quiz/start";
        let resp = self
            .http
            .post(self.url(endpoint))
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();

        if is_auth_rejection(status) {
            return Err(AppError::session_expired(endpoint));
        }

        if !status.is_success() {
            return Err(AppError::Generation(GenerationError::Rejected {
                status: status.as_u16(),
                message: extract_message(resp).await,
            }));
        }

        let payload: Value = resp.json().await?;
        Ok(payload)
    }

    /// 获取单题提示
    ///
    /// # 参数
    /// - `question_id`: 题目ID
    pub async fn get_hint(&self, question_id: &str) -> AppResult<String> {
        let endpoint = "/get_hint";
        let resp = self
            .http
            .post(self.url(endpoint))
            .json(&json!({ "question_id": question_id }))
            .send()
            .await
            .map_err(|e| AppError::hint_fetch_failed(question_id, e))?;

        let status = resp.status();

        if is_auth_rejection(status) {
            return Err(AppError::session_expired(endpoint));
        }

        if !status.is_success() {
            return Err(AppError::Hint(crate::error::HintError::Unavailable {
                question_id: question_id.to_string(),
            }));
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::hint_fetch_failed(question_id, e))?;

        match body.get("hint").and_then(|v| v.as_str()) {
            Some(hint) if !hint.is_empty() => Ok(hint.to_string()),
            _ => Err(AppError::Hint(crate::error::HintError::Unavailable {
                question_id: question_id.to_string(),
            })),
        }
    }
}

/// 是否属于凭证被拒绝
fn is_auth_rejection(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN
}

/// 从错误响应体中提取 message 字段
async fn extract_message(resp: reqwest::Response) -> Option<String> {
    let body: Value = resp.json().await.ok()?;
    body.get("message")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
