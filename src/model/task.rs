//! Analysis tasks and inbound request validation

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use utoipa::ToSchema;

/// Named analysis mode selecting which prompts are sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Paraphrase,
    Humanize,
    AiDetect,
    Plagiarism,
    Full,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::Paraphrase,
        Task::Humanize,
        Task::AiDetect,
        Task::Plagiarism,
        Task::Full,
    ];

    /// Wire identifier used by the HTTP API
    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Paraphrase => "paraphrase",
            Task::Humanize => "humanize",
            Task::AiDetect => "ai-detect",
            Task::Plagiarism => "plagiarism",
            Task::Full => "full",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a task identifier is not one of [`Task::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported task: {0}")]
pub struct UnsupportedTask(pub String);

impl FromStr for Task {
    type Err = UnsupportedTask;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str() == s)
            .ok_or_else(|| UnsupportedTask(s.to_string()))
    }
}

/// Body of `POST /analyze`
///
/// Fields are optional at the wire level so that missing values produce the
/// same 400 responses as empty ones.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalysisRequest {
    /// Text to analyze; must not be blank
    #[serde(default)]
    pub text: Option<String>,
    /// One of `paraphrase`, `humanize`, `ai-detect`, `plagiarism`, `full`
    #[serde(default)]
    pub task: Option<String>,
    /// Synonym intensity slider sent by the UI; accepted and ignored
    #[serde(default)]
    #[allow(dead_code)]
    pub synonyms: Option<f64>,
}

/// Request rejected before any model call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestValidationError {
    #[error("Text is required")]
    MissingText,

    #[error("Task is required")]
    MissingTask,

    #[error(transparent)]
    UnsupportedTask(#[from] UnsupportedTask),
}

/// A request whose text is non-blank and whose task is known
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Original text, untrimmed
    pub text: String,
    pub task: Task,
}

impl AnalysisRequest {
    /// Check text first, then task presence, then task identifier
    pub fn validate(self) -> Result<ValidatedRequest, RequestValidationError> {
        let text = match self.text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Err(RequestValidationError::MissingText),
        };

        let task = match self.task {
            Some(task) if !task.is_empty() => task,
            _ => return Err(RequestValidationError::MissingTask),
        };

        Ok(ValidatedRequest {
            text,
            task: task.parse()?,
        })
    }
}
