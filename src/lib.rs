// src/lib.rs
//
// Filters job postings retrieved from an upstream job-search API down to
// small/medium-business employers. The pipeline per posting is
// fetch → classify → decide; the batch filter orchestrates it with pacing
// and per-posting failure isolation.

pub mod config;
pub mod filter;
pub mod web;

pub use config::{FilterSettings, GeminiCredential};
pub use filter::{BatchFilter, BatchOutcome, FilterSummary, JobRecord};
pub use web::start_web_server;
