//! # QuizPro Client
//!
//! 一个围绕 QuizPro 出题服务的会话与出题编排客户端
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有唯一的 HTTP 连接（含会话 Cookie），只暴露接口能力
//! - `ApiClient` - 登录态查询、登录/注销、出题提交、提示获取
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，互不感知流程
//! - `SessionGuard` - 会话解析与守卫能力（未登录即短路）
//! - `HintCache` / `HintService` - 按题取提示能力（带 in-flight 去重）
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次出题"的完整流程与状态机
//! - `submission_builder` - 聚合校验（文本 + 文件 + 偏好 → Submission）
//! - `GenerationFlow` - 任务状态机（Submitted → Generating → Ready/Failed）
//! - `QuizSession` - 只读作答视图
//!
//! ### ④ 编排层（App）
//! - `app` - 路由角色：守卫入口、批量调度请求、模拟导航边界

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{ApiClient, UserStatus};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{
    ContentSource, GenerationPreferences, ModelProvider, Question, QuestionType, Quiz,
    QuizRequestFile, Submission,
};
pub use services::{HintCache, HintEntry, HintService, Session, SessionGuard};
pub use workflow::{build_submission, FileInput, GenerationFlow, JobStatus, QuizSession};
