// src/filter/batch.rs
use super::classifier::Classifier;
use super::decision::matches_affirmative;
use super::denylist::Denylist;
use super::fetcher::ContentFetcher;
use super::gemini::{GeminiClient, TextGenerator};
use super::JobRecord;
use crate::config::{FilterSettings, GeminiCredential};
use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Aggregate counts for one batch run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FilterSummary {
    pub total: usize,
    pub kept: usize,
    pub removed: usize,
}

/// Kept records plus the run's counts. `jobs` is always an order-preserving
/// subsequence of the input.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub jobs: Vec<JobRecord>,
    pub summary: FilterSummary,
}

/// Runs the fetch → classify → decide pipeline over a list of postings,
/// strictly in order, with a pacing delay between consecutive postings.
///
/// A single posting can never abort the batch: an error inside one
/// posting's pipeline resolves to the configured failure bias and the loop
/// moves on.
pub struct BatchFilter {
    fetcher: ContentFetcher,
    classifier: Classifier,
    settings: FilterSettings,
}

impl BatchFilter {
    /// Production wiring: Gemini backend when the credential is configured,
    /// the built-in denylist, settings as loaded.
    pub fn new(settings: FilterSettings, credential: &GeminiCredential) -> Result<Self> {
        let backend: Option<Arc<dyn TextGenerator>> = match credential {
            GeminiCredential::Configured(key) => Some(Arc::new(GeminiClient::new(key)?)),
            GeminiCredential::NotConfigured => None,
        };
        Self::with_backend(settings, backend, Denylist::default())
    }

    /// Explicit wiring for callers that bring their own backend or denylist.
    pub fn with_backend(
        settings: FilterSettings,
        backend: Option<Arc<dyn TextGenerator>>,
        denylist: Denylist,
    ) -> Result<Self> {
        let fetcher = ContentFetcher::new(settings.scrape_timeout_secs)?;
        let classifier = Classifier::new(backend, denylist, settings.keep_on_failure);
        Ok(Self {
            fetcher,
            classifier,
            settings,
        })
    }

    /// Filter a batch. Always completes; never returns an error for a
    /// posting-level failure.
    pub async fn run(&self, jobs: Vec<JobRecord>) -> BatchOutcome {
        let total = jobs.len();
        info!("Starting job filtering, {} postings to analyze", total);

        let mut kept_jobs = Vec::new();
        for (idx, job) in jobs.into_iter().enumerate() {
            let keep = match self.process(&job).await {
                Ok(keep) => keep,
                Err(e) => {
                    error!("Error processing {}: {:#}", job.employer_name(), e);
                    self.settings.keep_on_failure
                }
            };

            if keep {
                debug!("Kept: {}", job.employer_name());
                kept_jobs.push(job);
            } else {
                debug!("Removed: {}", job.employer_name());
            }

            // Pace the upstream services; no pause after the last posting.
            // The delay arrives unvalidated from requests and flags, and a
            // negative or non-finite value must not panic the batch.
            let delay_secs = self.settings.request_delay_secs;
            if idx + 1 < total && delay_secs.is_finite() && delay_secs > 0.0 {
                tokio::time::sleep(std::time::Duration::from_secs_f64(delay_secs)).await;
            }
        }

        let summary = FilterSummary {
            total,
            kept: kept_jobs.len(),
            removed: total - kept_jobs.len(),
        };
        info!(
            "Filtering complete: {} total, {} kept, {} removed",
            summary.total, summary.kept, summary.removed
        );

        BatchOutcome {
            jobs: kept_jobs,
            summary,
        }
    }

    /// One posting's pipeline. The `Result` is the per-posting isolation
    /// boundary `run` resolves with the failure bias.
    async fn process(&self, job: &JobRecord) -> Result<bool> {
        debug!("Analyzing: {} @ {}", job.title(), job.employer_name());

        let excerpt = match (self.settings.scrape_links, job.apply_link()) {
            (true, Some(url)) => self.fetcher.fetch(url).await,
            _ => None,
        };

        let verdict = self.classifier.classify(job, excerpt.as_deref()).await;
        Ok(matches_affirmative(&verdict, self.settings.fuzzy_threshold))
    }
}
