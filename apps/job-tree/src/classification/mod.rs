//! Job-role classification: prompt construction, the pluggable `Classifier`
//! seam, and reduction of raw completions to a classification URI.
//!
//! Default backend: `OllamaClassifier` (local Ollama server via `LlmClient`).

pub mod uri;

use std::fmt;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use thiserror::Error;

use crate::llm_client::prompts::CLASSIFY_PROMPT_TEMPLATE;
use crate::llm_client::{LlmClient, LlmError};

pub use uri::{ClassificationUri, UriError};

pub const SOURCE_TAG: &str = "hoche";
pub const DATASET_TAG: &str = "2025_job_roles";

/// The envelope every classification URI starts with:
/// `hoche.2025_job_roles.V<major>/<minor>.<YYYY>/<MM>/<DD>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyPrefix {
    pub major: u32,
    pub minor: u32,
    pub date: NaiveDate,
}

impl HierarchyPrefix {
    pub fn new(major: u32, minor: u32, date: NaiveDate) -> Self {
        Self { major, minor, date }
    }

    /// Prefix stamped with the local date.
    pub fn today(major: u32, minor: u32) -> Self {
        Self::new(major, minor, Local::now().date_naive())
    }
}

impl fmt::Display for HierarchyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SOURCE_TAG}.{DATASET_TAG}.V{}/{}.{}",
            self.major,
            self.minor,
            self.date.format("%Y/%m/%d")
        )
    }
}

/// Why a single job role could not be classified. Never fatal to a run.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("completion contained no URI")]
    NoUri,
}

/// The classifier trait. Implement this to swap backends without touching
/// the pipeline.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, job_role: &str, industries: &[String])
        -> Result<String, ClassifyError>;
}

pub struct OllamaClassifier {
    llm: LlmClient,
    prefix: HierarchyPrefix,
}

impl OllamaClassifier {
    pub fn new(llm: LlmClient, prefix: HierarchyPrefix) -> Self {
        Self { llm, prefix }
    }
}

#[async_trait]
impl Classifier for OllamaClassifier {
    async fn classify(
        &self,
        job_role: &str,
        industries: &[String],
    ) -> Result<String, ClassifyError> {
        let prompt = build_prompt(&self.prefix, industries, job_role);
        let completion = self.llm.complete(&prompt).await?;
        extract_uri(&completion).ok_or(ClassifyError::NoUri)
    }
}

/// Renders the classification prompt for one job role.
pub fn build_prompt(prefix: &HierarchyPrefix, industries: &[String], job_role: &str) -> String {
    CLASSIFY_PROMPT_TEMPLATE
        .replace("{prefix}", &prefix.to_string())
        .replace("{industries}", &industries.join("\n"))
        .replace("{job_role}", job_role)
}

/// Reduces a raw completion to a single URI string.
///
/// Reasoning models prepend a `<think>` block, and most models like to wrap
/// answers in code fences or backticks. Of the remaining lines, the first one
/// starting with the source tag wins, otherwise the last non-empty line.
pub fn extract_uri(completion: &str) -> Option<String> {
    let text = match completion.rfind("</think>") {
        Some(idx) => &completion[idx + "</think>".len()..],
        None => completion,
    };

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with("```"))
        .map(|line| line.trim_matches('`').trim())
        .filter(|line| !line.is_empty())
        .collect();

    let tagged = format!("{SOURCE_TAG}.");
    lines
        .iter()
        .find(|line| line.starts_with(&tagged))
        .or_else(|| lines.last())
        .map(|line| line.to_string())
}
