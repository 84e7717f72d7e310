pub mod analysis;
pub mod llm;
pub mod sanitizer;

pub use analysis::{AnalysisError, AnalysisService};
pub use llm::{ChatClient, GroqClient, LlmError};
