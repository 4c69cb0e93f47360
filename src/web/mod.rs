// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::config::{FilterSettings, GeminiCredential};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/filter", data = "<request>")]
pub async fn filter_jobs(
    request: Json<FilterJobsRequest>,
    settings: &State<FilterSettings>,
    credential: &State<GeminiCredential>,
) -> Result<Json<FilterJobsResponse>, Json<StandardErrorResponse>> {
    handlers::filter_jobs_handler(request, settings, credential).await
}

#[get("/health")]
pub async fn health(credential: &State<GeminiCredential>) -> Json<HealthResponse> {
    handlers::health_handler(credential).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
    ))
}

// Main server start function
pub async fn start_web_server(
    settings: FilterSettings,
    credential: GeminiCredential,
    port: u16,
) -> Result<()> {
    info!("Starting SMB Job Filter API server on port {}", port);
    info!(
        "AI backend: {}",
        if credential.is_configured() {
            "configured"
        } else {
            "not configured (denylist + default verdicts)"
        }
    );

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    let _rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(settings)
        .manage(credential)
        .register("/api", catchers![bad_request, internal_error])
        .mount("/api", routes![filter_jobs, health, options])
        .launch()
        .await?;

    Ok(())
}
