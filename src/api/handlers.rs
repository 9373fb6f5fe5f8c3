//! HTTP handlers for the book catalog API.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};

use super::dto::{BookDto, CreateBookRequest, CreateParams, ListParams, PageDto};
use super::{ApiError, AppState};

/// `POST /api/v1/books` - create a book, optionally enriching it first.
///
/// Returns 201 with a `Location` header pointing at the new record.
pub async fn create_book(
    State(state): State<AppState>,
    Query(params): Query<CreateParams>,
    Json(body): Json<CreateBookRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<BookDto>), ApiError> {
    let input = body.into_input(params.enrich, params.require_enrichment);
    let book = state.catalog.create_book(input).await?;

    tracing::info!(book_id = %book.id, "create request processed");
    let location = format!("/api/v1/books/{}", book.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(book.into()),
    ))
}

/// `GET /api/v1/books` - filtered, sorted, paginated listing.
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<PageDto<BookDto>>, ApiError> {
    let query = params
        .into_query()
        .map_err(|e| ApiError::Validation(e.to_string()))?;
    Ok(Json(state.catalog.list_books(&query).into()))
}

/// `GET /api/v1/books/{id}` - fetch one book.
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BookDto>, ApiError> {
    let book = state.catalog.get_book(&id)?;
    Ok(Json(book.into()))
}

/// `DELETE /api/v1/books/{id}` - remove one book.
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.catalog.delete_book(&id)?;
    Ok(StatusCode::NO_CONTENT)
}
