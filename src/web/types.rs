// src/web/types.rs
use crate::filter::JobRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct FilterJobsRequest {
    pub jobs: Vec<JobRecord>,
    /// Per-request override of the configured scraping flag.
    #[serde(default)]
    pub scrape_links: Option<bool>,
    /// Per-request override of the configured pacing delay.
    #[serde(default)]
    pub delay_secs: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct FilterJobsResponse {
    pub success: bool,
    pub total: usize,
    pub kept: usize,
    pub removed: usize,
    pub jobs: Vec<JobRecord>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub ai_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct StandardErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String) -> Self {
        Self {
            success: false,
            error,
            error_code,
        }
    }
}
