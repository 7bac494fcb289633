/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端服务地址
    pub api_base_url: String,
    /// 登录邮箱
    pub email: String,
    /// 登录密码
    pub password: String,
    /// 出题请求文件存放目录
    pub request_folder: String,
    /// 单次请求超时（秒），出题接口可能较慢
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 是否在退出前注销会话
    pub logout_on_exit: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            email: String::new(),
            password: String::new(),
            request_folder: "quiz_requests".to_string(),
            request_timeout_secs: 300,
            verbose_logging: false,
            logout_on_exit: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            api_base_url: std::env::var("QUIZPRO_API_BASE_URL").unwrap_or(default.api_base_url),
            email: std::env::var("QUIZPRO_EMAIL").unwrap_or(default.email),
            password: std::env::var("QUIZPRO_PASSWORD").unwrap_or(default.password),
            request_folder: std::env::var("QUIZPRO_REQUEST_FOLDER").unwrap_or(default.request_folder),
            request_timeout_secs: std::env::var("QUIZPRO_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            logout_on_exit: std::env::var("QUIZPRO_LOGOUT_ON_EXIT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.logout_on_exit),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
