//! HTTP routes for receipt upload and lookup.
//!
//! | Method | Path                    | Success              | Failure |
//! |--------|-------------------------|----------------------|---------|
//! | POST   | `/api/receipts/upload`  | 200 + receipt JSON   | 400     |
//! | GET    | `/api/receipts/{id}`    | 200 + receipt JSON   | 404     |
//! | GET    | `/health`               | 200 `OK`             |         |

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Path, State};
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use fairshare_core::Receipt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::error::{ApiError, ApiResult};
use crate::parser::parse_document;
use crate::AppState;

/// Multipart field carrying the receipt document.
pub const UPLOAD_FIELD: &str = "bill";

/// Builds the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_upload_bytes;
    let cors = cors_layer(&state.config.cors_origin);

    Router::new()
        .route("/api/receipts/upload", post(upload_receipt))
        .route("/api/receipts/{id}", get(get_receipt))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!(origin, "Unusable CORS origin, cross-origin requests will be refused");
            layer
        }
    }
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn upload_receipt(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<Receipt>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Skipping multipart field");
            continue;
        }

        let file_name = field.file_name().unwrap_or("unnamed").to_string();
        let document = field.bytes().await?;
        let size = document.len();

        let parsed = tokio::task::spawn_blocking(move || parse_document(&document))
            .await
            .map_err(|e| ApiError::internal(format!("Receipt parser task failed: {}", e)))?
            .map_err(|e| {
                warn!(file_name = %file_name, bytes = size, error = %e, "Receipt rejected");
                ApiError::from(e)
            })?;

        let receipt = state.store.save(parsed.into_receipt()).await;
        info!(
            receipt_id = %receipt.id,
            file_name = %file_name,
            items = receipt.items.len(),
            "Receipt stored"
        );
        return Ok(Json(receipt));
    }

    Err(ApiError::bad_request(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}

async fn get_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Receipt>> {
    match state.store.get(&id).await {
        Some(receipt) => Ok(Json(receipt)),
        None => {
            debug!(receipt_id = %id, "Receipt lookup missed");
            Err(ApiError::not_found("Receipt", &id))
        }
    }
}
