//! Structured results decoded from model output and returned to clients

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Paraphrase and humanize output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RewriteResult {
    pub paraphrased_text: String,
    pub readability_score: f64,
    pub tone_used: String,
    pub confidence_score: f64,
}

/// AI-generation likelihood estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiDetectionResult {
    pub ai_likelihood: f64,
    pub classification: String,
    pub reason: String,
    pub confidence_score: f64,
}

/// Similarity estimate against public content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlagiarismResult {
    pub similarity_score: f64,
    pub verdict: String,
    pub comment: String,
    pub confidence_score: f64,
}

/// RefineAgent output; also the `refine_agent` section of a full report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RefineResult {
    pub paraphrased_text: String,
    pub readability_score: f64,
}

/// InsightAgent output; also the `insight_agent` section of a full report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InsightResult {
    pub summary: String,
    pub feedback: String,
}

/// `verify_agent` section merged from the AI-detection and copy-scan calls
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VerifyReport {
    pub ai_likelihood: f64,
    pub similarity_score: f64,
    pub verdict: String,
}

/// Composed report of the `full` task
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct FullReport {
    pub original_text: String,
    pub refine_agent: RefineResult,
    pub verify_agent: VerifyReport,
    pub insight_agent: InsightResult,
}

impl FullReport {
    pub fn compose(
        original_text: String,
        refine: RefineResult,
        ai_detection: AiDetectionResult,
        plagiarism: PlagiarismResult,
        insight: InsightResult,
    ) -> Self {
        Self {
            original_text,
            refine_agent: refine,
            verify_agent: VerifyReport {
                ai_likelihood: ai_detection.ai_likelihood,
                similarity_score: plagiarism.similarity_score,
                verdict: plagiarism.verdict,
            },
            insight_agent: insight,
        }
    }
}

/// Task-shaped response body, serialized without a wrapper
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisResponse {
    Rewrite(RewriteResult),
    AiDetection(AiDetectionResult),
    Plagiarism(PlagiarismResult),
    Full(FullReport),
}
