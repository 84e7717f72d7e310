//! Application state and service initialization
//!
//! The chat client is built once here and shared by reference with the
//! analysis service, so handlers never touch process-wide client state.

use std::sync::Arc;

use crate::model::Config;
use crate::service::{AnalysisService, ChatClient, GroqClient};

/// Application state containing all services and shared resources
pub struct AppState {
    /// Text analysis service
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Build application state from configuration
    ///
    /// A missing `GROQ_API_KEY` does not stop the server: the health endpoint
    /// keeps working and analysis requests fail with a configuration error.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        if config.llm.base_url.trim().is_empty() {
            return Err(AppError::InvalidConfig("llm.base_url must not be empty"));
        }

        let groq_client = GroqClient::new(config.api_key.clone(), &config.llm.base_url);

        if groq_client.is_configured() {
            tracing::info!(base_url = %config.llm.base_url, "Groq client initialized");
        } else {
            tracing::warn!(
                "GROQ_API_KEY is not set; analysis requests will fail until it is configured"
            );
        }

        Ok(Self::with_client(Arc::new(groq_client), config))
    }

    /// Build application state around an existing chat client
    pub fn with_client(chat_client: Arc<dyn ChatClient>, config: &Config) -> Self {
        let analysis_service = Arc::new(AnalysisService::new(
            chat_client,
            config.models.clone(),
            config.llm.clone(),
        ));

        Self { analysis_service }
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
