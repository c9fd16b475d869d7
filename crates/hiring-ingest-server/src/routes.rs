//! HTTP endpoint adapters: CSV upload, the two report routes, and health.
//!
//! Handlers translate pipeline and loader outcomes into status codes and
//! JSON bodies. Client input problems are 400, dependency failures 500;
//! every error body is `{"error": ...}`.

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use hiring_ingest::{
    departments_above_mean, hired_by_quarter, load_batches, process, DbPool, DepartmentHires,
    LoadError, QuarterlyHires, SchemaRegistry,
};

/// Shared state for all handlers.
pub struct AppState {
    pub pool: DbPool,
    pub registry: SchemaRegistry,
    pub batch_size: usize,
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn client_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn dependency_error(message: impl Into<String>) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn map_load_error(e: LoadError) -> ApiError {
    if e.is_client_error() {
        client_error(e.to_string())
    } else {
        error!("{}", e.format_detailed());
        dependency_error(e.to_string())
    }
}

/// Build the application router.
pub fn router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/upload/:table_name", post(upload_handler))
        .route("/employees_hired_by_quarter", get(hired_by_quarter_handler))
        .route(
            "/departments_above_mean_hiring",
            get(departments_above_mean_handler),
        )
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload_handler(
    State(state): State<Arc<AppState>>,
    Path(table_name): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    // Extract the file field from the multipart body.
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| client_error(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| client_error(e.to_string()))?;
            file = Some((filename, data));
            break;
        }
    }

    let (filename, data) = file.ok_or_else(|| client_error("No file part"))?;
    if filename.is_empty() {
        return Err(client_error("No selected file"));
    }
    if !filename.ends_with(".csv") {
        return Err(client_error(
            "Invalid file format. Please upload a CSV file.",
        ));
    }

    let schema = state
        .registry
        .lookup(&table_name)
        .ok_or_else(|| client_error(format!("Unknown table name: {}", table_name)))?;

    let csv_text = String::from_utf8(data.to_vec())
        .map_err(|_| client_error("File is not valid UTF-8"))?;

    let outcome = process(&csv_text, schema, state.batch_size).map_err(map_load_error)?;

    let mut conn = state
        .pool
        .get_conn("acquiring connection for upload")
        .await
        .map_err(|e| {
            error!("{}", e.format_detailed());
            dependency_error("Database connection failed")
        })?;

    let inserted = load_batches(&mut conn, schema, &outcome.batches)
        .await
        .map_err(map_load_error)?;

    info!(
        "Successfully uploaded {} rows to {} ({} dropped)",
        inserted, table_name, outcome.dropped
    );
    Ok(Json(json!({
        "message": format!("Successfully uploaded {} rows to {}", inserted, table_name)
    })))
}

async fn hired_by_quarter_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<QuarterlyHires>>, ApiError> {
    let rows = hired_by_quarter(&state.pool).await.map_err(map_load_error)?;
    Ok(Json(rows))
}

async fn departments_above_mean_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<DepartmentHires>>, ApiError> {
    let rows = departments_above_mean(&state.pool)
        .await
        .map_err(map_load_error)?;
    Ok(Json(rows))
}
