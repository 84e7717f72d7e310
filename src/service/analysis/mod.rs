//! Text analysis service
//!
//! Maps an analysis task to one or more chat-completion calls, sanitizes each
//! response and composes the task-shaped result.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::model::{
    AiDetectionResult, AnalysisResponse, FullReport, InsightResult, LlmSettings, ModelConfig,
    PlagiarismResult, RefineResult, Task,
};
use crate::service::llm::{ChatClient, ChatMessage, ChatRequest};
use crate::service::sanitizer::ResponseSanitizer;

pub mod error;
pub mod prompts;

pub use error::AnalysisError;
use prompts::{JSON_ONLY_SYSTEM_PROMPT, PromptKind, build_user_prompt};

/// Service that runs analysis tasks against the chat model
pub struct AnalysisService {
    chat_client: Arc<dyn ChatClient>,
    models: ModelConfig,
    settings: LlmSettings,
    sanitizer: ResponseSanitizer,
}

impl AnalysisService {
    /// Creates a new analysis service around a shared chat client
    pub fn new(chat_client: Arc<dyn ChatClient>, models: ModelConfig, settings: LlmSettings) -> Self {
        tracing::info!(
            paraphrase_model = %models.paraphrase,
            humanize_model = %models.humanize,
            ai_detect_model = %models.ai_detect,
            plagiarism_model = %models.plagiarism,
            insight_model = %models.insight,
            "Analysis service initialized"
        );

        Self {
            chat_client,
            models,
            settings,
            sanitizer: ResponseSanitizer::new(),
        }
    }

    /// Run `task` over `text`
    ///
    /// The `full` task issues its four calls one after another; the first
    /// failure aborts the rest and no partial report is returned.
    pub async fn analyze(&self, text: &str, task: Task) -> Result<AnalysisResponse, AnalysisError> {
        tracing::debug!(task = %task, text_length = text.len(), "Starting analysis");

        let response = match task {
            Task::Paraphrase => AnalysisResponse::Rewrite(
                self.call(PromptKind::Paraphrase, &self.models.paraphrase, text)
                    .await?,
            ),
            Task::Humanize => AnalysisResponse::Rewrite(
                self.call(PromptKind::Humanize, &self.models.humanize, text)
                    .await?,
            ),
            Task::AiDetect => AnalysisResponse::AiDetection(
                self.call(PromptKind::AiDetect, &self.models.ai_detect, text)
                    .await?,
            ),
            Task::Plagiarism => AnalysisResponse::Plagiarism(
                self.call(PromptKind::Plagiarism, &self.models.plagiarism, text)
                    .await?,
            ),
            Task::Full => AnalysisResponse::Full(self.full_report(text).await?),
        };

        Ok(response)
    }

    async fn full_report(&self, text: &str) -> Result<FullReport, AnalysisError> {
        let refine: RefineResult = self
            .call(PromptKind::RefineAgent, &self.models.paraphrase, text)
            .await?;
        let ai_detection: AiDetectionResult = self
            .call(PromptKind::VerifyAgent, &self.models.ai_detect, text)
            .await?;
        let plagiarism: PlagiarismResult = self
            .call(PromptKind::CopyScanAgent, &self.models.plagiarism, text)
            .await?;
        let insight: InsightResult = self
            .call(PromptKind::InsightAgent, &self.models.insight, text)
            .await?;

        Ok(FullReport::compose(
            text.to_string(),
            refine,
            ai_detection,
            plagiarism,
            insight,
        ))
    }

    /// One chat completion followed by sanitizing and schema decoding
    async fn call<T: DeserializeOwned>(
        &self,
        kind: PromptKind,
        model: &str,
        text: &str,
    ) -> Result<T, AnalysisError> {
        let start_time = std::time::Instant::now();
        let prompt = build_user_prompt(kind, text);
        let prompt_length = prompt.len();

        let request = ChatRequest::new(
            model,
            vec![
                ChatMessage::system(JSON_ONLY_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            &self.settings,
        );

        let content = match self.chat_client.complete(&request).await {
            Ok(content) => {
                tracing::info!(
                    call = kind.label(),
                    model = %model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    "Chat completion call completed successfully"
                );
                content
            }
            Err(e) => {
                tracing::error!(
                    call = kind.label(),
                    model = %model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "Chat completion call failed"
                );
                return Err(AnalysisError::ExternalCall {
                    call: kind.label(),
                    source: e,
                });
            }
        };

        self.sanitizer
            .parse(content.as_deref(), kind.label())
            .map_err(|source| AnalysisError::MalformedModelOutput {
                call: kind.label(),
                source,
            })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted chat client for exercising the service without the network

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::service::llm::{ChatClient, ChatRequest, LlmError};

    pub enum Reply {
        Text(&'static str),
        Empty,
        Fail,
    }

    pub struct ScriptedClient {
        replies: Mutex<VecDeque<Reply>>,
        pub requests: Mutex<Vec<ChatRequest>>,
    }

    impl ScriptedClient {
        pub fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatClient for ScriptedClient {
        async fn complete(&self, request: &ChatRequest) -> Result<Option<String>, LlmError> {
            self.requests.lock().unwrap().push(request.clone());

            match self.replies.lock().unwrap().pop_front() {
                Some(Reply::Text(text)) => Ok(Some(text.to_string())),
                Some(Reply::Empty) => Ok(None),
                Some(Reply::Fail) | None => Err(LlmError::Api {
                    status: 503,
                    body: "upstream unavailable".to_string(),
                }),
            }
        }
    }

    pub const REWRITE_REPLY: &str = r#"{"paraphrased_text":"A rephrased sentence.","readability_score":72,"tone_used":"formal","confidence_score":0.91}"#;
    pub const AI_DETECT_REPLY: &str = r#"<think>Short, varied sentences.</think>{"ai_likelihood":0.18,"classification":"human","reason":"irregular rhythm","confidence_score":0.7}"#;
    pub const PLAGIARISM_REPLY: &str = "```json\n{\"similarity_score\":0.04,\"verdict\":\"original\",\"comment\":\"no overlap found\",\"confidence_score\":0.66}\n```";
    pub const REFINE_REPLY: &str = r#"{"paraphrased_text":"A refined sentence.","readability_score":68.5}"#;
    pub const INSIGHT_REPLY: &str = r#"Here is my review: {"summary":"A brief statement.","feedback":"Add a concrete example."} Hope that helps."#;
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::service::llm::{ChatRole, LlmError};
    use crate::service::sanitizer::SanitizeError;

    fn service(client: Arc<ScriptedClient>) -> AnalysisService {
        let models = ModelConfig {
            paraphrase: "para-model".to_string(),
            humanize: "human-model".to_string(),
            ai_detect: "detect-model".to_string(),
            plagiarism: "copy-model".to_string(),
            insight: "insight-model".to_string(),
        };
        AnalysisService::new(client, models, LlmSettings::default())
    }

    #[tokio::test]
    async fn test_paraphrase_single_call() {
        let client = Arc::new(ScriptedClient::new(vec![Reply::Text(REWRITE_REPLY)]));
        let service = service(client.clone());

        let response = service.analyze("The cat sat.", Task::Paraphrase).await.unwrap();

        match response {
            AnalysisResponse::Rewrite(result) => {
                assert_eq!(result.paraphrased_text, "A rephrased sentence.");
                assert_eq!(result.readability_score, 72.0);
                assert_eq!(result.tone_used, "formal");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "para-model");
        assert_eq!(requests[0].messages[0].role, ChatRole::System);
        assert_eq!(requests[0].messages[0].content, JSON_ONLY_SYSTEM_PROMPT);
        assert!(requests[0].messages[1].content.contains("Text:\"\"\"The cat sat.\"\"\""));
        assert!(requests[0].messages[1].content.contains("professional paraphraser"));
    }

    #[tokio::test]
    async fn test_humanize_uses_humanize_model() {
        let client = Arc::new(ScriptedClient::new(vec![Reply::Text(REWRITE_REPLY)]));
        let service = service(client.clone());

        service.analyze("hello", Task::Humanize).await.unwrap();

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].model, "human-model");
        assert!(requests[0].messages[1].content.contains("human writing coach"));
    }

    #[tokio::test]
    async fn test_ai_detect_and_plagiarism() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text(AI_DETECT_REPLY),
            Reply::Text(PLAGIARISM_REPLY),
        ]));
        let service = service(client.clone());

        let detect = service.analyze("hello", Task::AiDetect).await.unwrap();
        assert!(matches!(
            detect,
            AnalysisResponse::AiDetection(AiDetectionResult { ref classification, .. }) if classification == "human"
        ));

        let copy = service.analyze("hello", Task::Plagiarism).await.unwrap();
        assert!(matches!(
            copy,
            AnalysisResponse::Plagiarism(PlagiarismResult { ref verdict, .. }) if verdict == "original"
        ));

        let requests = client.requests.lock().unwrap();
        assert_eq!(requests[0].model, "detect-model");
        assert_eq!(requests[1].model, "copy-model");
    }

    #[tokio::test]
    async fn test_full_report_composition() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text(REFINE_REPLY),
            Reply::Text(AI_DETECT_REPLY),
            Reply::Text(PLAGIARISM_REPLY),
            Reply::Text(INSIGHT_REPLY),
        ]));
        let service = service(client.clone());

        let response = service.analyze("Original text.", Task::Full).await.unwrap();

        let AnalysisResponse::Full(report) = response else {
            panic!("expected full report");
        };
        assert_eq!(report.original_text, "Original text.");
        assert_eq!(report.refine_agent.paraphrased_text, "A refined sentence.");
        assert_eq!(report.refine_agent.readability_score, 68.5);
        assert_eq!(report.verify_agent.ai_likelihood, 0.18);
        assert_eq!(report.verify_agent.similarity_score, 0.04);
        assert_eq!(report.verify_agent.verdict, "original");
        assert_eq!(report.insight_agent.summary, "A brief statement.");
        assert_eq!(report.insight_agent.feedback, "Add a concrete example.");

        // Sequential, in a fixed order, with the configured models
        let requests = client.requests.lock().unwrap();
        let models: Vec<&str> = requests.iter().map(|r| r.model.as_str()).collect();
        assert_eq!(models, ["para-model", "detect-model", "copy-model", "insight-model"]);
        assert!(requests[0].messages[1].content.starts_with("Act as RefineAgent."));
        assert!(requests[1].messages[1].content.starts_with("Act as VerifyAgent."));
        assert!(requests[2].messages[1].content.starts_with("Act as CopyScanAgent."));
        assert!(requests[3].messages[1].content.starts_with("Act as InsightAgent."));
        // No call sees another call's output
        for request in requests.iter() {
            assert!(request.messages[1].content.contains("Text:\"\"\"Original text.\"\"\""));
            assert!(!request.messages[1].content.contains("A refined sentence."));
        }
    }

    #[tokio::test]
    async fn test_full_aborts_on_second_call_failure() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text(REFINE_REPLY),
            Reply::Fail,
            Reply::Text(PLAGIARISM_REPLY),
            Reply::Text(INSIGHT_REPLY),
        ]));
        let service = service(client.clone());

        let err = service.analyze("Original text.", Task::Full).await.unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::ExternalCall {
                call: "verify_agent",
                source: LlmError::Api { status: 503, .. }
            }
        ));
        assert_eq!(client.call_count(), 2);
    }

    #[tokio::test]
    async fn test_full_aborts_on_malformed_output() {
        let client = Arc::new(ScriptedClient::new(vec![
            Reply::Text(REFINE_REPLY),
            Reply::Text(AI_DETECT_REPLY),
            Reply::Text("I cannot estimate that."),
            Reply::Text(INSIGHT_REPLY),
        ]));
        let service = service(client.clone());

        let err = service.analyze("text", Task::Full).await.unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::MalformedModelOutput {
                call: "copy_scan_agent",
                source: SanitizeError::Malformed
            }
        ));
        assert_eq!(client.call_count(), 3);
    }

    #[tokio::test]
    async fn test_schema_mismatch_is_malformed_output() {
        let client = Arc::new(ScriptedClient::new(vec![Reply::Text(
            r#"{"paraphrased_text":"x","tone_used":"casual"}"#,
        )]));
        let service = service(client);

        let err = service.analyze("hello", Task::Paraphrase).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedModelOutput {
                source: SanitizeError::SchemaMismatch { .. },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_empty_completion() {
        let client = Arc::new(ScriptedClient::new(vec![Reply::Empty]));
        let service = service(client);

        let err = service.analyze("hello", Task::AiDetect).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedModelOutput {
                source: SanitizeError::MissingContent,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let client = Arc::new(crate::service::llm::GroqClient::new(
            None,
            crate::model::config::DEFAULT_BASE_URL,
        ));
        let service = AnalysisService::new(client, ModelConfig::default(), LlmSettings::default());

        let err = service.analyze("hello", Task::Paraphrase).await.unwrap_err();
        assert!(err.is_configuration());
    }
}
