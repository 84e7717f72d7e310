//! Prompts for text analysis

/// System prompt shared by every analysis call
pub const JSON_ONLY_SYSTEM_PROMPT: &str =
    "You are ContentRefiner, an assistant that must answer with strict minified JSON only.";

pub const REWRITE_SCHEMA: &str = r#"{"paraphrased_text":string,"readability_score":number,"tone_used":string,"confidence_score":number}"#;
pub const AI_DETECT_SCHEMA: &str = r#"{"ai_likelihood":number,"classification":string,"reason":string,"confidence_score":number}"#;
pub const PLAGIARISM_SCHEMA: &str = r#"{"similarity_score":number,"verdict":string,"comment":string,"confidence_score":number}"#;
pub const REFINE_SCHEMA: &str = r#"{"paraphrased_text":string,"readability_score":number}"#;
pub const INSIGHT_SCHEMA: &str = r#"{"summary":string,"feedback":string}"#;

/// User prompt body for each kind of call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Paraphrase,
    Humanize,
    AiDetect,
    Plagiarism,
    RefineAgent,
    VerifyAgent,
    CopyScanAgent,
    InsightAgent,
}

impl PromptKind {
    fn instruction(&self) -> &'static str {
        match self {
            PromptKind::Paraphrase => {
                "You are a professional paraphraser. Rephrase the following text while keeping meaning intact."
            }
            PromptKind::Humanize => {
                "You are a human writing coach. Rewrite the following text to sound more natural, empathetic, and engaging for a broad audience while preserving meaning."
            }
            PromptKind::AiDetect => {
                "You are an AI text detector. Classify whether the following text is AI-generated or human-written."
            }
            PromptKind::Plagiarism => {
                "You are a plagiarism checker. Estimate how much of this text is copied from public sources."
            }
            PromptKind::RefineAgent => {
                "Act as RefineAgent. Paraphrase the given text professionally and report readability."
            }
            PromptKind::VerifyAgent => {
                "Act as VerifyAgent. Determine AI-generation likelihood for the provided text."
            }
            PromptKind::CopyScanAgent => {
                "Act as CopyScanAgent. Estimate similarity against public content for the provided text."
            }
            PromptKind::InsightAgent => {
                "Act as InsightAgent. Summarize the writing and provide actionable feedback."
            }
        }
    }

    fn response_directive(&self) -> &'static str {
        match self {
            PromptKind::Paraphrase | PromptKind::Humanize => {
                "Respond ONLY with minified JSON in this exact schema:"
            }
            PromptKind::AiDetect | PromptKind::Plagiarism => {
                "Respond ONLY with minified JSON in this schema:"
            }
            _ => "Respond ONLY with minified JSON:",
        }
    }

    pub fn schema(&self) -> &'static str {
        match self {
            PromptKind::Paraphrase | PromptKind::Humanize => REWRITE_SCHEMA,
            PromptKind::AiDetect | PromptKind::VerifyAgent => AI_DETECT_SCHEMA,
            PromptKind::Plagiarism | PromptKind::CopyScanAgent => PLAGIARISM_SCHEMA,
            PromptKind::RefineAgent => REFINE_SCHEMA,
            PromptKind::InsightAgent => INSIGHT_SCHEMA,
        }
    }

    /// Short name used in logs and schema errors
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Paraphrase => "paraphrase",
            PromptKind::Humanize => "humanize",
            PromptKind::AiDetect => "ai-detect",
            PromptKind::Plagiarism => "plagiarism",
            PromptKind::RefineAgent => "refine_agent",
            PromptKind::VerifyAgent => "verify_agent",
            PromptKind::CopyScanAgent => "copy_scan_agent",
            PromptKind::InsightAgent => "insight_agent",
        }
    }
}

/// Build the user prompt; the text is embedded verbatim in a `"""` block
pub fn build_user_prompt(kind: PromptKind, text: &str) -> String {
    format!(
        "{}\nText:\"\"\"{}\"\"\"\n{}{}.",
        kind.instruction(),
        text,
        kind.response_directive(),
        kind.schema()
    )
}
