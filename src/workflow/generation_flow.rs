//! 出题任务流程 - 流程层
//!
//! 核心职责：把"提交 → 等待 → 拿到测验或错误"封装为一个可等待的单元
//!
//! 状态机：
//! - `Submitted` → `Generating`：收到出题接口的 HTTP 响应（引擎已受理）
//! - `Generating` → `Ready`：响应体解析出完整测验
//! - `Generating` → `Failed`：非成功响应或响应体无法解析
//!
//! 终态不可再迁移，也不会自动重试；重试必须构建新的 Submission。
//! 观察到的协议只有单次请求/响应，没有任务状态查询接口，
//! 所以这里不做轮询，卡住的生成表现为一直等待

use crate::clients::ApiClient;
use crate::error::{AppError, AppResult, GenerationError};
use crate::models::quiz::{parse_quiz_payload, Quiz};
use crate::models::submission::Submission;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

/// 任务状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// 已提交，等待引擎受理
    Submitted,
    /// 引擎已受理，生成中
    Generating,
    /// 生成完成（终态）
    Ready,
    /// 生成失败（终态）
    Failed,
}

impl JobStatus {
    /// 是否为终态
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Ready | JobStatus::Failed)
    }

    fn name(self) -> &'static str {
        match self {
            JobStatus::Submitted => "Submitted",
            JobStatus::Generating => "Generating",
            JobStatus::Ready => "Ready",
            JobStatus::Failed => "Failed",
        }
    }
}

/// 出题任务
///
/// 由流程独占持有；每次提交创建新任务，ID 不复用
#[derive(Debug)]
pub struct GenerationJob {
    /// 任务ID
    pub id: u64,
    status: JobStatus,
    /// 失败原因（仅 Failed 时有值）
    pub error: Option<String>,
}

impl GenerationJob {
    /// 创建新任务，初始状态为 Submitted
    pub fn new(id: u64) -> Self {
        Self {
            id,
            status: JobStatus::Submitted,
            error: None,
        }
    }

    /// 当前状态
    pub fn status(&self) -> JobStatus {
        self.status
    }

    /// 状态迁移
    ///
    /// 只允许 Submitted→Generating、Generating→Ready、
    /// Generating→Failed；终态冻结，任何继续迁移都是程序错误
    pub fn advance(&mut self, next: JobStatus) -> AppResult<()> {
        let valid = matches!(
            (self.status, next),
            (JobStatus::Submitted, JobStatus::Generating)
                | (JobStatus::Generating, JobStatus::Ready)
                | (JobStatus::Generating, JobStatus::Failed)
        );

        if !valid {
            return Err(AppError::Other(format!(
                "非法的任务状态迁移: {} -> {} (任务 {})",
                self.status.name(),
                next.name(),
                self.id
            )));
        }

        self.status = next;
        Ok(())
    }

    /// 标记失败并记录原因
    fn fail(&mut self, reason: String) -> AppResult<()> {
        self.advance(JobStatus::Failed)?;
        self.error = Some(reason);
        Ok(())
    }
}

/// 任务句柄
///
/// submit 成功后返回，交给 await_result 驱动到终态
#[derive(Debug)]
pub struct JobHandle {
    /// 任务ID
    pub id: u64,
    epoch: u64,
    submission: Submission,
}

/// 出题任务流程
///
/// - 同一视图实例同时最多一个在途任务（in_flight 标志）
/// - 导航离开后未返回的结果会被丢弃，不会事后激活新测验
pub struct GenerationFlow {
    client: Arc<ApiClient>,
    in_flight: AtomicBool,
    next_job_id: AtomicU64,
    epoch: AtomicU64,
}

impl GenerationFlow {
    /// 创建新的出题流程
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            in_flight: AtomicBool::new(false),
            next_job_id: AtomicU64::new(0),
            epoch: AtomicU64::new(0),
        }
    }

    /// 是否有在途任务（UI 据此禁用重复提交）
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// 提交出题任务
    ///
    /// # 参数
    /// - `submission`: 已通过校验的提交载荷
    ///
    /// # 返回
    /// 已有任务在途时立即返回 AlreadyInFlight，不发请求
    pub fn submit(&self, submission: Submission) -> AppResult<JobHandle> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(AppError::Generation(GenerationError::AlreadyInFlight));
        }

        let id = self.next_job_id.fetch_add(1, Ordering::SeqCst) + 1;
        let epoch = self.epoch.load(Ordering::SeqCst);

        info!(
            "📤 提交出题任务 {}: 模型={} 题型={} 数量={}",
            id,
            submission.preferences.model,
            submission.preferences.question_type,
            submission.preferences.question_count
        );

        Ok(JobHandle {
            id,
            epoch,
            submission,
        })
    }

    /// 等待任务结果
    ///
    /// 把任务驱动到终态并返回测验或错误。
    /// 无论成败都会释放 in_flight 标志；
    /// 若期间发生过取消（导航离开），结果被丢弃并返回 Cancelled
    pub async fn await_result(&self, handle: JobHandle) -> AppResult<Quiz> {
        let JobHandle {
            id,
            epoch,
            submission,
        } = handle;

        let mut job = GenerationJob::new(id);
        let result = self.drive(&mut job, submission).await;

        self.in_flight.store(false, Ordering::SeqCst);

        // 导航已离开：结果不再属于任何人，静默丢弃
        if self.epoch.load(Ordering::SeqCst) != epoch {
            warn!("任务 {} 的结果已被取消丢弃", id);
            return Err(AppError::Generation(GenerationError::Cancelled {
                job_id: id,
            }));
        }

        match &result {
            Ok(quiz) => info!("✅ 任务 {} 完成: 共 {} 道题", id, quiz.len()),
            Err(e) => warn!("❌ 任务 {} 失败: {}", id, e),
        }

        result
    }

    /// 驱动任务经历完整的状态迁移
    async fn drive(&self, job: &mut GenerationJob, submission: Submission) -> AppResult<Quiz> {
        let question_type = submission.preferences.question_type;
        let form = submission.into_form()?;

        let payload = match self.client.start_quiz(form).await {
            Ok(payload) => {
                // 收到响应即视为引擎已受理
                job.advance(JobStatus::Generating)?;
                payload
            }
            Err(e) => {
                // 失败路径同样按顺序走完状态机
                job.advance(JobStatus::Generating)?;
                job.fail(e.to_string())?;
                return Err(e);
            }
        };

        match parse_quiz_payload(&payload, question_type) {
            Ok(quiz) => {
                job.advance(JobStatus::Ready)?;
                Ok(quiz)
            }
            Err(e) => {
                job.fail(e.to_string())?;
                Err(e)
            }
        }
    }

    /// 取消在途任务（导航离开时调用）
    ///
    /// 已经发出的请求无法真正中断，但它的结果回来后会被丢弃
    pub fn cancel_outstanding(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.in_flight.store(false, Ordering::SeqCst);
    }
}
