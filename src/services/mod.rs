pub mod hint_cache;
pub mod hint_service;
pub mod session_guard;

pub use hint_cache::{HintCache, HintEntry};
pub use hint_service::HintService;
pub use session_guard::{Session, SessionGuard, UserRef};
