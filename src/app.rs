//! 编排层
//!
//! 扮演"路由层"的角色：
//! - 进入受保护流程前先过会话守卫，把认证错误映射为登录动作
//! - 逐个处理出题请求：构建 → 提交 → 等待 → 作答视图 → 预取提示
//! - 每个请求结束后模拟"离开测验页"：丢弃测验并清空提示缓存

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::preferences::GenerationPreferences;
use crate::models::request::QuizRequestFile;
use crate::models::{load_all_toml_files, Quiz};
use crate::services::{HintService, Session, SessionGuard};
use crate::utils::logging::{
    init_log_file, log_requests_loaded, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::{build_submission, FileInput, GenerationFlow, QuizSession};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    session_guard: SessionGuard,
    generation_flow: GenerationFlow,
    hint_service: HintService,
    quiz_session: QuizSession,
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;
        log_startup(&config.api_base_url);

        let client = Arc::new(ApiClient::new(&config)?);

        Ok(Self {
            session_guard: SessionGuard::new(client.clone()),
            generation_flow: GenerationFlow::new(client.clone()),
            hint_service: HintService::new(client),
            quiz_session: QuizSession::new(),
            config,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&mut self) -> Result<()> {
        // 会话守卫：没有有效会话时任何下游组件都不会执行
        let session = self.enter_protected().await?;
        if let Some(user) = &session.identity {
            info!("👤 当前用户: {}", user.email);
        }

        // 加载所有待处理的出题请求
        let requests = load_all_toml_files(&self.config.request_folder).await?;
        if requests.is_empty() {
            warn!("⚠️ 没有找到待处理的出题请求文件，程序结束");
            return Ok(());
        }

        log_requests_loaded(requests.len());

        let mut stats = ProcessingStats {
            total: requests.len(),
            ..Default::default()
        };

        for (idx, request) in requests.into_iter().enumerate() {
            let label = request
                .file_path
                .clone()
                .unwrap_or_else(|| format!("请求 {}", idx + 1));

            match self.process_request(&request).await {
                Ok(()) => {
                    stats.success += 1;
                }
                Err(e) if e.is_auth() => {
                    // 认证错误不内联展示，短路整个批次
                    error!("会话已失效，停止处理剩余请求");
                    stats.failed += 1;
                    break;
                }
                Err(e) => {
                    error!("[{}] ❌ 处理失败: {}", label, e);
                    stats.failed += 1;
                }
            }

            // 离开测验页：丢弃测验，清空提示缓存
            self.quiz_session.clear();
            self.hint_service.clear().await;
        }

        print_final_stats(stats.success, stats.failed, stats.total);

        if self.config.logout_on_exit {
            if let Err(e) = self.session_guard.logout().await {
                warn!("注销失败: {}", e);
            }
        }

        Ok(())
    }

    /// 进入受保护流程
    ///
    /// require_session 返回认证错误时等价于"被重定向到登录页"：
    /// 用配置里的凭证登录后重新进入；凭证缺失则放弃
    async fn enter_protected(&self) -> Result<Session> {
        match self.session_guard.require_session().await {
            Ok(session) => Ok(session),
            Err(e) if e.is_auth() => {
                info!("🔐 未登录，跳转登录页");
                if self.config.email.is_empty() {
                    anyhow::bail!("未配置登录凭证 (QUIZPRO_EMAIL / QUIZPRO_PASSWORD)");
                }
                let session = self
                    .session_guard
                    .login(&self.config.email, &self.config.password)
                    .await
                    .context("登录失败")?;
                Ok(session)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 处理单个出题请求
    async fn process_request(&mut self, request: &QuizRequestFile) -> AppResult<()> {
        let preferences = GenerationPreferences::parse(
            &request.model,
            &request.question_type,
            request.num_questions,
        )?;

        let files = self.read_request_files(request).await?;
        let pasted_text = request.pasted_text.as_deref().unwrap_or("");

        // 校验 + 打包（失败时不会发出任何网络请求）
        let submission = build_submission(pasted_text, files, preferences)?;

        // 提交并等待结果
        let handle = self.generation_flow.submit(submission)?;
        let quiz = self.generation_flow.await_result(handle).await?;

        self.quiz_session.activate(quiz);
        self.show_questions()?;
        self.prefetch_hints().await;

        Ok(())
    }

    /// 读取请求引用的本地文件
    async fn read_request_files(&self, request: &QuizRequestFile) -> AppResult<Vec<FileInput>> {
        let mut files = Vec::with_capacity(request.files.len());

        for path in &request.files {
            let bytes = tokio::fs::read(path).await.map_err(|e| {
                AppError::Other(format!("无法读取内容文件 {}: {}", path, e))
            })?;
            let name = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.clone());
            files.push(FileInput::new(name, bytes));
        }

        Ok(files)
    }

    /// 展示题目列表
    fn show_questions(&self) -> AppResult<()> {
        let total = self.quiz_session.len();

        for index in 0..total {
            let question = self.quiz_session.question(index)?;
            info!(
                "  {}. [{}] {}",
                index + 1,
                question.id,
                truncate_text(&question.prompt, 80)
            );

            if let Some(options) = &question.options {
                for (key, text) in options {
                    info!("     {}) {}", key, truncate_text(text, 60));
                }
            }
        }

        Ok(())
    }

    /// 并发预取所有题目的提示
    ///
    /// 不同题目的请求相互独立、同时在途；
    /// 单题失败只告警，不影响其余题目
    async fn prefetch_hints(&self) {
        let quiz = match self.quiz_session.current() {
            Ok(quiz) => quiz,
            Err(_) => return,
        };

        let ids: Vec<String> = quiz
            .questions
            .iter()
            .filter(|q| q.hint_available)
            .map(|q| q.id.clone())
            .collect();

        if ids.is_empty() {
            return;
        }

        info!("💡 预取 {} 道题目的提示...", ids.len());

        let fetches = ids.iter().map(|id| self.hint_service.get_hint(id));
        let results = futures::future::join_all(fetches).await;

        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(hint) => info!("  [{}] 提示: {}", id, truncate_text(&hint, 60)),
                Err(e) => warn!("  [{}] 提示获取失败（可重试）: {}", id, e),
            }
        }

        info!("💡 已缓存提示 {} 条", self.hint_service.cached_count().await);
    }

    /// 当前激活的测验（只读）
    pub fn active_quiz(&self) -> AppResult<&Quiz> {
        self.quiz_session.current()
    }
}
