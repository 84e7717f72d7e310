//! Error types for text analysis

use thiserror::Error;

use crate::service::llm::LlmError;
use crate::service::sanitizer::SanitizeError;

/// Error type for text analysis
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("{call} call failed: {source}")]
    ExternalCall {
        call: &'static str,
        #[source]
        source: LlmError,
    },

    #[error("{call} returned unusable output: {source}")]
    MalformedModelOutput {
        call: &'static str,
        #[source]
        source: SanitizeError,
    },
}

impl AnalysisError {
    /// True when the failure comes from missing credentials rather than the API itself
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AnalysisError::ExternalCall {
                source: LlmError::MissingApiKey,
                ..
            }
        )
    }
}
