// src/filter/mod.rs
use serde::{Deserialize, Serialize};

pub mod batch;
pub mod classifier;
pub mod decision;
pub mod denylist;
pub mod fetcher;
pub mod gemini;

pub use batch::{BatchFilter, BatchOutcome, FilterSummary};
pub use classifier::Classifier;
pub use decision::{matches_affirmative, similarity_ratio};
pub use denylist::Denylist;
pub use fetcher::ContentFetcher;
pub use gemini::{GeminiClient, TextGenerator};

/// Sentinel shown to the AI for fields the upstream API did not populate.
pub const UNKNOWN_FIELD: &str = "N/A";

/// One job posting as returned by the upstream job-search API.
///
/// Only the fixed fields below are read by the pipeline; everything else the
/// API sent rides along in `extra` and is re-serialized untouched, so the
/// filter output stays byte-compatible with its input records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_company_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employer_website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_apply_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_naics_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_naics_name: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl JobRecord {
    pub fn title(&self) -> &str {
        self.job_title.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn employer_name(&self) -> &str {
        self.employer_name.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn company_type(&self) -> &str {
        self.employer_company_type.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn website(&self) -> &str {
        self.employer_website.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn location(&self) -> &str {
        self.job_location.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn description(&self) -> &str {
        self.job_description.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    /// The application URL, only when it is actually usable for a fetch.
    pub fn apply_link(&self) -> Option<&str> {
        self.job_apply_link.as_deref().filter(|link| !link.is_empty())
    }

    pub fn naics_code(&self) -> &str {
        self.job_naics_code.as_deref().unwrap_or(UNKNOWN_FIELD)
    }

    pub fn naics_name(&self) -> &str {
        self.job_naics_name.as_deref().unwrap_or(UNKNOWN_FIELD)
    }
}
