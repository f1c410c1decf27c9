//! Health check handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: ReadinessChecks,
}

#[derive(Serialize)]
pub struct ReadinessChecks {
    pub catalog: CheckStatus,
    pub ffmpeg: CheckStatus,
    pub output_dir: CheckStatus,
}

#[derive(Serialize)]
pub struct CheckStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckStatus {
    fn ok(detail: Option<String>) -> Self {
        Self {
            status: "ok".to_string(),
            error: None,
            detail,
        }
    }

    fn error(msg: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            error: Some(msg.into()),
            detail: None,
        }
    }
}

/// Readiness check endpoint (readiness probe).
/// Checks the catalog, the FFmpeg binary, and the output directory.
pub async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadinessResponse>, (StatusCode, Json<ReadinessResponse>)> {
    let catalog_check = {
        let entries = state.generator.catalog().len().await;
        if entries > 0 {
            CheckStatus::ok(Some(format!("{entries} entries")))
        } else {
            CheckStatus::error("catalog holds no entries")
        }
    };

    let ffmpeg_check = match signclip_media::check_ffmpeg() {
        Ok(path) => CheckStatus::ok(Some(path.display().to_string())),
        Err(e) => CheckStatus::error(e.to_string()),
    };

    let output_check = match state.generator.ensure_output_dir().await {
        Ok(()) => CheckStatus::ok(None),
        Err(e) => CheckStatus::error(e.to_string()),
    };

    let all_ok = catalog_check.status == "ok"
        && ffmpeg_check.status == "ok"
        && output_check.status == "ok";

    let response = ReadinessResponse {
        status: if all_ok { "ready" } else { "degraded" }.to_string(),
        checks: ReadinessChecks {
            catalog: catalog_check,
            ffmpeg: ffmpeg_check,
            output_dir: output_check,
        },
    };

    if all_ok {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
