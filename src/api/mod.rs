//! HTTP presentation layer.
//!
//! Maps the catalog service onto a small JSON REST surface. Everything
//! here is translation: extractors and DTOs at the edge, the documented
//! error envelope on the way out. No business rules live in this module.

pub mod dto;
mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::catalog::CatalogService;
use crate::error::CatalogError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogService>,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/v1/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/api/v1/books/:id",
            get(handlers::get_book).delete(handlers::delete_book),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API-level error with a stable wire code.
#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    Conflict,
    NotFound,
    Upstream(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION",
            ApiError::Conflict => "CONFLICT",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Upstream(_) => "UPSTREAM",
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Validation(msg) => msg.clone(),
            ApiError::Conflict => "resource already exists".to_string(),
            ApiError::NotFound => "book not found".to_string(),
            ApiError::Upstream(msg) => msg.clone(),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            CatalogError::Conflict => ApiError::Conflict,
            CatalogError::NotFound => ApiError::NotFound,
            CatalogError::Upstream(source) => ApiError::Upstream(source.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::info!(code = self.code(), %status, "request failed");
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}
