pub mod loaders;
pub mod preferences;
pub mod quiz;
pub mod request;
pub mod submission;

pub use loaders::{load_all_toml_files, load_toml_to_quiz_request};
pub use preferences::{GenerationPreferences, ModelProvider, QuestionType};
pub use quiz::{Question, Quiz};
pub use request::QuizRequestFile;
pub use submission::{ContentSource, Submission};
