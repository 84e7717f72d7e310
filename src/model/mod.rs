pub mod analysis;
pub mod config;
pub mod task;

pub use analysis::*;
pub use config::{Config, LlmSettings, ModelConfig};
pub use task::{AnalysisRequest, RequestValidationError, Task, ValidatedRequest};
