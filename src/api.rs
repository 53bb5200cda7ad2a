//! HTTP API for the pgmp-prep sync server

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::models::{
    CreateAccountRequest, CreateAccountResponse, FetchProgressResponse, JoinAccountRequest,
    JoinAccountResponse, PushProgressRequest, PushProgressResponse, UpsertProgressRequest,
    UpsertProgressResponse,
};
use crate::registry::IdentityStore;

/// Application state shared across handlers
pub struct AppState {
    pub store: Arc<dyn IdentityStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(store: Arc<dyn IdentityStore>, config: Config) -> Arc<Self> {
        Arc::new(Self { store, config })
    }
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/pair", post(create_account).put(join_account))
        .route(
            "/api/v1/progress",
            get(fetch_progress)
                .post(upsert_progress)
                .put(push_progress),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "pgmp-prep",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a new sync account
async fn create_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<Json<CreateAccountResponse>, ApiError> {
    let device_name = request
        .device_name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown Device".to_string());
    let device_type = request
        .device_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let grant = state
        .store
        .create_account(request.name, device_name.clone(), device_type, Utc::now())?;

    tracing::info!(
        user_id = %grant.user_id,
        device = %device_name,
        "sync account created"
    );

    Ok(Json(CreateAccountResponse {
        success: true,
        sync_code: grant.sync_code,
        user_id: grant.user_id,
        device_id: grant.device_id,
        message: "Sync account created! Save your sync code to access from other devices."
            .to_string(),
    }))
}

/// Join an existing sync account with a code
async fn join_account(
    State(state): State<Arc<AppState>>,
    Json(request): Json<JoinAccountRequest>,
) -> Result<Json<JoinAccountResponse>, ApiError> {
    let sync_code = match request.sync_code.as_deref().map(str::trim) {
        Some(code) if !code.is_empty() => code.to_string(),
        _ => return Err(ApiError::BadRequest("Sync code is required".to_string())),
    };

    let device_name = request
        .device_name
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown Device".to_string());
    let device_type = request
        .device_type
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    let grant = state
        .store
        .join_account(&sync_code, device_name.clone(), device_type, Utc::now())?
        .ok_or_else(|| ApiError::NotFound("Invalid sync code".to_string()))?;

    tracing::info!(
        user_id = %grant.user_id,
        device = %device_name,
        seeded_records = grant.progress.len(),
        "device joined sync account"
    );

    Ok(Json(JoinAccountResponse {
        success: true,
        user_id: grant.user_id,
        device_id: grant.device_id,
        sync_code: grant.sync_code,
        name: grant.name,
        task_progress: grant.progress,
        message: "Successfully connected to sync account!".to_string(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressQuery {
    #[serde(default)]
    user_id: Option<String>,
}

/// Fetch all progress for a user. Unknown users get an empty map rather
/// than an error.
async fn fetch_progress(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<FetchProgressResponse>, ApiError> {
    let user_id = query
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("User ID is required".to_string()))?;

    let task_progress = state.store.progress_for(&user_id)?.unwrap_or_default();

    Ok(Json(FetchProgressResponse {
        success: true,
        task_progress,
        last_sync: Utc::now(),
    }))
}

/// Save or update a single progress record
async fn upsert_progress(
    State(state): State<Arc<AppState>>,
    Json(request): Json<UpsertProgressRequest>,
) -> Result<Json<UpsertProgressResponse>, ApiError> {
    let (user_id, task_id) = match (request.user_id.clone(), request.task_id.clone()) {
        (Some(user), Some(task)) if !user.is_empty() && !task.is_empty() => (user, task),
        _ => {
            return Err(ApiError::BadRequest(
                "User ID and Task ID are required".to_string(),
            ));
        }
    };

    let progress = state
        .store
        .upsert_record(&user_id, request.into_record(task_id))?;

    Ok(Json(UpsertProgressResponse {
        success: true,
        progress,
    }))
}

/// Batch sync: merge the device's full progress map and answer with the
/// canonical map after the merge.
async fn push_progress(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PushProgressRequest>,
) -> Result<Json<PushProgressResponse>, ApiError> {
    let (user_id, progress) = match (request.user_id, request.progress) {
        (Some(user), Some(progress)) if !user.is_empty() => (user, progress),
        _ => {
            return Err(ApiError::BadRequest(
                "User ID and progress data are required".to_string(),
            ));
        }
    };
    let device_id = request.device_id.unwrap_or_default();

    tracing::info!(
        user_id = %user_id,
        records = progress.len(),
        "progress push received"
    );

    let task_progress = state
        .store
        .merge_progress(&user_id, &device_id, progress, Utc::now())?;

    Ok(Json(PushProgressResponse {
        success: true,
        task_progress,
        last_sync: Utc::now(),
        message: "Progress synced successfully!".to_string(),
    }))
}

/// API error taxonomy mapped onto HTTP statuses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request field; the caller must correct input
    #[error("{0}")]
    BadRequest(String),

    /// Unknown sync code
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Self::Internal(error) => {
                tracing::error!(error = %error, "API error");
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        };

        (
            status,
            Json(serde_json::json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}
