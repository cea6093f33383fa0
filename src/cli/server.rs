//! HTTP server mode for REST API access to exports

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ExporterConfig;
use crate::directory::ChannelSummary;
use crate::engine::ExportEngine;
use crate::error::{Error, Result};
use crate::export::ExportOptions;
use crate::output::ExportArtifact;

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Settings every request's engine is built from
    pub exporter: ExporterConfig,
}

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: ServerConfig,
}

/// Query string for the channel listing
#[derive(Debug, Default, Deserialize)]
struct ChannelsQuery {
    /// Session token forwarded to the platform
    #[serde(default)]
    token: Option<String>,
}

/// Request body for the export endpoint
#[derive(Debug, Deserialize)]
struct ExportRequest {
    #[serde(flatten)]
    options: ExportOptions,
    /// Session token forwarded to the platform
    #[serde(default)]
    token: Option<String>,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the application router
pub fn router(config: ServerConfig) -> Router {
    let state = AppState { config };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/channels", get(list_channels))
        .route("/export", post(export))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    config.exporter.validate()?;
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Map a crate error to a status code and JSON body
fn error_response(error: &Error) -> Response {
    let status = if error.is_configuration() {
        StatusCode::BAD_REQUEST
    } else if error.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    tracing::warn!("Request failed ({}): {}", status, error);
    (status, Json(ApiResponse::<()>::error(error.to_string()))).into_response()
}

async fn channels_for(
    config: &ExporterConfig,
    token: Option<String>,
) -> Result<Vec<ChannelSummary>> {
    let engine = ExportEngine::from_config(config, token)?;
    engine.list_channels().await
}

async fn export_for(
    config: &ExporterConfig,
    options: &ExportOptions,
    token: Option<String>,
) -> Result<ExportArtifact> {
    let mut engine = ExportEngine::from_config(config, token)?;
    engine.export(options).await
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List exportable channels
async fn list_channels(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ChannelsQuery>,
) -> Response {
    match channels_for(&state.config.exporter, query.token).await {
        Ok(channels) => (
            StatusCode::OK,
            Json(ApiResponse::success(json!({
                "type": "CHANNELS",
                "channels": channels
            }))),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Export one channel and return the file as an attachment
async fn export(State(state): State<Arc<AppState>>, Json(req): Json<ExportRequest>) -> Response {
    if let Err(e) = req.options.validate() {
        return error_response(&e);
    }

    match export_for(&state.config.exporter, &req.options, req.token).await {
        Ok(artifact) => {
            let disposition = format!("attachment; filename=\"{}\"", artifact.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, artifact.content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact.bytes,
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}
