use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::normalize::{Normalized, RecordKind, normalize_response};
use crate::sanitizer;

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
    pub version: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn api_error(status: StatusCode, error: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: error.to_string(),
        }),
    )
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sanitize", post(sanitize))
        .route("/normalize/{kind}", post(normalize_kind))
}

async fn health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
    })
}

async fn sanitize(body: String) -> ApiResult<Value> {
    sanitizer::extract_value(&body)
        .map(Json)
        .map_err(|e| api_error(StatusCode::UNPROCESSABLE_ENTITY, e))
}

async fn normalize_kind(Path(kind): Path<String>, body: String) -> ApiResult<Normalized> {
    let kind: RecordKind = kind
        .parse()
        .map_err(|e: crate::TripError| api_error(StatusCode::NOT_FOUND, e.user_message()))?;
    debug!(%kind, len = body.len(), "Normalizing posted model response");
    Ok(Json(normalize_response(&body, kind)))
}
