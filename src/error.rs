use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 认证/会话错误
    Auth(AuthError),
    /// 提交校验错误
    Validation(ValidationError),
    /// 出题任务错误
    Generation(GenerationError),
    /// 提示获取错误
    Hint(HintError),
    /// 测验会话错误
    Quiz(QuizError),
    /// HTTP API 调用错误
    Api(ApiError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Auth(e) => write!(f, "认证错误: {}", e),
            AppError::Validation(e) => write!(f, "校验错误: {}", e),
            AppError::Generation(e) => write!(f, "出题错误: {}", e),
            AppError::Hint(e) => write!(f, "提示错误: {}", e),
            AppError::Quiz(e) => write!(f, "测验错误: {}", e),
            AppError::Api(e) => write!(f, "API错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Auth(e) => Some(e),
            AppError::Validation(e) => Some(e),
            AppError::Generation(e) => Some(e),
            AppError::Hint(e) => Some(e),
            AppError::Quiz(e) => Some(e),
            AppError::Api(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 认证/会话错误
///
/// 这类错误永远不内联展示，由路由层统一映射为"跳转登录页"
#[derive(Debug)]
pub enum AuthError {
    /// 未登录（或会话解析结果为未认证）
    NotLoggedIn,
    /// 服务端拒绝了当前凭证（401/403）
    SessionExpired {
        endpoint: String,
    },
    /// 登录失败
    LoginFailed {
        message: String,
    },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::NotLoggedIn => write!(f, "当前未登录"),
            AuthError::SessionExpired { endpoint } => {
                write!(f, "会话已失效 (接口: {})", endpoint)
            }
            AuthError::LoginFailed { message } => write!(f, "登录失败: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

/// 提交校验错误
///
/// 校验在本地完成，校验失败时不会发出任何网络请求
#[derive(Debug)]
pub enum ValidationError {
    /// 题目数量超出允许范围 [1, 50]
    QuestionCountOutOfRange {
        count: u32,
    },
    /// 未知的模型名称
    UnknownModel {
        value: String,
    },
    /// 未知的题型
    UnknownQuestionType {
        value: String,
    },
    /// 提交内容为空（既没有有效的粘贴文本，也没有上传文件）
    EmptySubmission,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::QuestionCountOutOfRange { count } => {
                write!(f, "题目数量 {} 超出范围 [1, 50]", count)
            }
            ValidationError::UnknownModel { value } => {
                write!(f, "未知的模型: {}", value)
            }
            ValidationError::UnknownQuestionType { value } => {
                write!(f, "未知的题型: {}", value)
            }
            ValidationError::EmptySubmission => {
                write!(f, "提交内容为空: 请粘贴文本或至少上传一个文件")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// 出题任务错误
#[derive(Debug)]
pub enum GenerationError {
    /// 服务端拒绝了出题请求
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// 返回的测验内容无法解析
    MalformedResult {
        detail: String,
    },
    /// 已有出题任务在进行中，不允许重复提交
    AlreadyInFlight,
    /// 任务结果已被取消（页面已离开）
    Cancelled {
        job_id: u64,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Rejected { status, message } => {
                write!(f, "出题请求被拒绝 (状态码: {}, 消息: {:?})", status, message)
            }
            GenerationError::MalformedResult { detail } => {
                write!(f, "测验内容解析失败: {}", detail)
            }
            GenerationError::AlreadyInFlight => {
                write!(f, "已有出题任务在进行中")
            }
            GenerationError::Cancelled { job_id } => {
                write!(f, "出题任务 {} 已取消", job_id)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// 提示获取错误
///
/// 单题级别、非致命、可重试
#[derive(Debug)]
pub enum HintError {
    /// 提示请求失败
    FetchFailed {
        question_id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端未返回提示内容
    Unavailable {
        question_id: String,
    },
}

impl fmt::Display for HintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HintError::FetchFailed {
                question_id,
                source,
            } => {
                write!(f, "获取提示失败 (题目: {}): {}", question_id, source)
            }
            HintError::Unavailable { question_id } => {
                write!(f, "该题目没有可用提示: {}", question_id)
            }
        }
    }
}

impl std::error::Error for HintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HintError::FetchFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 测验会话错误
///
/// 属于程序不变量被破坏的情况，正常 UI 流程不应触达
#[derive(Debug)]
pub enum QuizError {
    /// 没有处于激活状态的测验
    NoActiveQuiz,
    /// 题目索引超出范围
    IndexOutOfRange {
        index: usize,
        len: usize,
    },
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::NoActiveQuiz => write!(f, "当前没有激活的测验"),
            QuizError::IndexOutOfRange { index, len } => {
                write!(f, "题目索引 {} 超出范围 [0, {})", index, len)
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// HTTP API 调用错误
#[derive(Debug)]
pub enum ApiError {
    /// 网络请求失败
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应
    BadResponse {
        endpoint: String,
        status: u16,
        message: Option<String>,
    },
    /// JSON 解析失败
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::RequestFailed { endpoint, source } => {
                write!(f, "API请求失败 ({}): {}", endpoint, source)
            }
            ApiError::BadResponse {
                endpoint,
                status,
                message,
            } => {
                write!(
                    f,
                    "API返回错误响应 ({}): status={}, message={:?}",
                    endpoint, status, message
                )
            }
            ApiError::JsonParseFailed { source } => {
                write!(f, "JSON解析失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::RequestFailed { source, .. } | ApiError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量解析失败
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    EnvVarNotFound {
        var_name: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarParseFailed {
                var_name,
                value,
                expected_type,
            } => {
                write!(
                    f,
                    "环境变量 {} 解析失败: 值 '{}' 无法转换为 {}",
                    var_name, value, expected_type
                )
            }
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从常见错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err.url().map(|u| u.path().to_string()).unwrap_or_default();
        AppError::Api(ApiError::RequestFailed {
            endpoint,
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Other(format!("IO错误: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建会话失效错误
    pub fn session_expired(endpoint: impl Into<String>) -> Self {
        AppError::Auth(AuthError::SessionExpired {
            endpoint: endpoint.into(),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// 创建提示获取失败错误
    pub fn hint_fetch_failed(
        question_id: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Hint(HintError::FetchFailed {
            question_id: question_id.into(),
            source: Box::new(source),
        })
    }

    /// 创建测验内容解析错误
    pub fn malformed_result(detail: impl Into<String>) -> Self {
        AppError::Generation(GenerationError::MalformedResult {
            detail: detail.into(),
        })
    }

    /// 是否属于认证错误（需要跳转登录页）
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
