//! Extraction of JSON values from free-form model output
//!
//! Chat models wrap JSON in markdown fences, reasoning tags or prose despite
//! being told not to. The sanitizer strips the common noise, parses strictly,
//! and falls back to the span between the first `{` and the last `}`.

use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum SanitizeError {
    #[error("Model response was not text.")]
    MissingContent,

    #[error("Failed to parse model JSON response.")]
    Malformed,

    #[error("Model JSON response did not match the {schema} schema: {reason}")]
    SchemaMismatch { schema: &'static str, reason: String },
}

/// Which parse attempt produced the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsePath {
    Direct,
    Salvaged,
}

pub struct ResponseSanitizer {
    opening_fence: Regex,
    closing_fence: Regex,
    think_tag: Regex,
}

impl ResponseSanitizer {
    pub fn new() -> Self {
        Self {
            opening_fence: Regex::new(r"^```[a-zA-Z]*\n?").unwrap(),
            closing_fence: Regex::new(r"```$").unwrap(),
            think_tag: Regex::new(r"(?i)</?think>").unwrap(),
        }
    }

    /// Remove surrounding whitespace, an outer code fence and `<think>` markers
    pub fn clean(&self, raw: &str) -> String {
        let trimmed = raw.trim();

        let without_fence = if trimmed.starts_with("```") {
            let opened = self.opening_fence.replace(trimmed, "");
            self.closing_fence.replace(&opened, "").into_owned()
        } else {
            trimmed.to_string()
        };

        self.think_tag.replace_all(&without_fence, "").into_owned()
    }

    /// Parse model output into a JSON value, reporting which attempt succeeded
    pub fn extract(&self, raw: Option<&str>) -> Result<(Value, ParsePath), SanitizeError> {
        let raw = raw.ok_or(SanitizeError::MissingContent)?;
        let cleaned = self.clean(raw);

        if let Ok(value) = serde_json::from_str(&cleaned) {
            return Ok((value, ParsePath::Direct));
        }

        // First `{` to last `}`; braces in trailing prose make the span invalid
        if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}')) {
            if end > start {
                if let Ok(value) = serde_json::from_str(&cleaned[start..=end]) {
                    tracing::debug!(
                        skipped_prefix = start,
                        skipped_suffix = cleaned.len() - end - 1,
                        "Recovered JSON object from surrounding text"
                    );
                    return Ok((value, ParsePath::Salvaged));
                }
            }
        }

        tracing::error!(text = %cleaned, "Parsing model JSON response failed");
        Err(SanitizeError::Malformed)
    }

    /// Parse model output into a JSON value
    pub fn sanitize(&self, raw: Option<&str>) -> Result<Value, SanitizeError> {
        self.extract(raw).map(|(value, _)| value)
    }

    /// Parse model output and decode it into `T`, failing when required fields
    /// are absent or have the wrong type
    pub fn parse<T: DeserializeOwned>(
        &self,
        raw: Option<&str>,
        schema: &'static str,
    ) -> Result<T, SanitizeError> {
        let value = self.sanitize(raw)?;

        serde_json::from_value(value).map_err(|e| {
            tracing::error!(schema = schema, error = %e, "Model JSON response failed schema validation");
            SanitizeError::SchemaMismatch {
                schema,
                reason: e.to_string(),
            }
        })
    }
}

impl Default for ResponseSanitizer {
    fn default() -> Self {
        Self::new()
    }
}
