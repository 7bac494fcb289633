pub mod generation_flow;
pub mod quiz_session;
pub mod submission_builder;

pub use generation_flow::{GenerationFlow, GenerationJob, JobHandle, JobStatus};
pub use quiz_session::QuizSession;
pub use submission_builder::{build_submission, FileInput};
