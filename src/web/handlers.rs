// src/web/handlers.rs
use super::types::{FilterJobsRequest, FilterJobsResponse, HealthResponse, StandardErrorResponse};
use crate::config::{FilterSettings, GeminiCredential};
use crate::filter::BatchFilter;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn filter_jobs_handler(
    request: Json<FilterJobsRequest>,
    settings: &State<FilterSettings>,
    credential: &State<GeminiCredential>,
) -> Result<Json<FilterJobsResponse>, Json<StandardErrorResponse>> {
    let request = request.into_inner();
    info!("Filter request received: {} jobs", request.jobs.len());

    let mut settings = settings.inner().clone();
    if let Some(scrape_links) = request.scrape_links {
        settings = settings.with_scrape_links(scrape_links);
    }
    if let Some(delay_secs) = request.delay_secs {
        settings = settings.with_request_delay_secs(delay_secs);
    }

    let filter = match BatchFilter::new(settings, credential.inner()) {
        Ok(filter) => filter,
        Err(e) => {
            error!("Failed to build batch filter: {:#}", e);
            return Err(Json(StandardErrorResponse::new(
                "Failed to initialize the filtering pipeline".to_string(),
                "FILTER_INIT_FAILED".to_string(),
            )));
        }
    };

    // Pipeline failures never surface here; the batch always completes.
    let outcome = filter.run(request.jobs).await;

    Ok(Json(FilterJobsResponse {
        success: true,
        total: outcome.summary.total,
        kept: outcome.summary.kept,
        removed: outcome.summary.removed,
        jobs: outcome.jobs,
    }))
}

pub async fn health_handler(credential: &State<GeminiCredential>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "SMB Job Filter".to_string(),
        ai_configured: credential.is_configured(),
    })
}
