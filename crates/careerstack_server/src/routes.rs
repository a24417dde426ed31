use axum::extract::{Multipart, Query, State};
use axum::Json;
use careerstack_core::JobPosting;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use stack_logging::stack_info;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct FetchLatestParams {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct FetchLatestResponse {
    pub status: &'static str,
    pub count: usize,
    pub last_run: Option<DateTime<Utc>>,
    pub jobs: Vec<JobPosting>,
}

/// `GET /api/fetch-latest?force=bool` — serve the cached snapshot or run
/// a full refresh, depending on freshness and `force`.
pub async fn fetch_latest(
    State(state): State<AppState>,
    Query(params): Query<FetchLatestParams>,
) -> Result<Json<FetchLatestResponse>, ApiError> {
    let report = state.coordinator.refresh_or_serve(params.force).await?;
    let status = if report.served_from_cache {
        "cached"
    } else {
        "scraped"
    };
    Ok(Json(FetchLatestResponse {
        status,
        count: report.count,
        last_run: report.refreshed_at,
        jobs: report.postings,
    }))
}

/// `POST /api/upload-csv` — replace the company directory file. The
/// uploaded part must carry a `.csv` filename.
pub async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::Validation(format!("invalid multipart payload: {err}")))?
    {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if !file_name.ends_with(".csv") {
            return Err(ApiError::Validation("Only CSV allowed".to_string()));
        }
        let contents = field
            .bytes()
            .await
            .map_err(|err| ApiError::Validation(format!("failed to read upload: {err}")))?;
        state
            .directory
            .replace(&contents)
            .map_err(|err| ApiError::Internal(err.to_string()))?;
        stack_info!("company directory replaced ({} bytes)", contents.len());
        return Ok(Json(json!({ "status": "ok", "message": "uploaded" })));
    }
    Err(ApiError::Validation("missing file field".to_string()))
}

#[derive(Debug, Deserialize)]
pub struct SendTelegramRequest {
    pub title: String,
    pub company: String,
    pub url: String,
}

/// `POST /api/send-telegram` — forward one posting to the configured bot.
pub async fn send_telegram(
    State(state): State<AppState>,
    Json(request): Json<SendTelegramRequest>,
) -> Result<Json<Value>, ApiError> {
    let Some(notifier) = state.telegram.as_ref() else {
        return Err(ApiError::Configuration(
            "Telegram token/chat not set".to_string(),
        ));
    };
    let reply = notifier
        .send(&request.title, &request.company, &request.url)
        .await?;
    Ok(Json(reply))
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
