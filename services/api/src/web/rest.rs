//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use linkvault_core::domain::Bookmark;
use linkvault_core::ports::PortError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        create_bookmark_handler,
        list_bookmarks_handler,
        delete_bookmark_handler,
    ),
    components(
        schemas(
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            CreateBookmarkRequest,
            BookmarkResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Linkvault API", description = "API endpoints for saving, listing and deleting bookmarks.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct CreateBookmarkRequest {
    /// Raw user-supplied URL; a missing scheme is tolerated.
    pub url: String,
}

/// One saved bookmark as it crosses the wire.
#[derive(Serialize, ToSchema)]
pub struct BookmarkResponse {
    pub id: Uuid,
    pub url: String,
    pub title: String,
    pub favicon: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl From<Bookmark> for BookmarkResponse {
    fn from(b: Bookmark) -> Self {
        Self {
            id: b.id,
            url: b.url,
            title: b.title,
            favicon: b.favicon,
            summary: b.summary,
            created_at: b.created_at,
        }
    }
}

/// The stable error payload; internal causes are logged, never leaked.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiFailure = (StatusCode, Json<ErrorResponse>);

fn failure(status: StatusCode, message: &str) -> ApiFailure {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Maps a port error onto the wire contract.
fn port_failure(e: PortError) -> ApiFailure {
    match e {
        PortError::InvalidUrl(_) => failure(StatusCode::BAD_REQUEST, "invalid URL"),
        PortError::NotFound(_) => failure(StatusCode::NOT_FOUND, "not found"),
        PortError::Unauthorized => failure(StatusCode::UNAUTHORIZED, "unauthorized"),
        PortError::Conflict(_) => failure(StatusCode::CONFLICT, "conflict"),
        PortError::Upstream(_) | PortError::Unexpected(_) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Save a bookmark.
///
/// Runs the full ingestion pipeline for the authenticated user: URL
/// normalization, summary fetch, title extraction and persistence.
#[utoipa::path(
    post,
    path = "/bookmarks",
    request_body = CreateBookmarkRequest,
    responses(
        (status = 201, description = "Bookmark created", body = BookmarkResponse),
        (status = 400, description = "The URL could not be parsed", body = ErrorResponse),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn create_bookmark_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<CreateBookmarkRequest>,
) -> Result<impl IntoResponse, ApiFailure> {
    let bookmark = state.ingest.ingest(user_id, &req.url).await.map_err(|e| {
        error!("Failed to ingest bookmark: {:?}", e);
        port_failure(e)
    })?;

    Ok((StatusCode::CREATED, Json(BookmarkResponse::from(bookmark))))
}

/// List the caller's bookmarks, newest first.
#[utoipa::path(
    get,
    path = "/bookmarks",
    responses(
        (status = 200, description = "The caller's bookmarks, newest first", body = [BookmarkResponse]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn list_bookmarks_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, ApiFailure> {
    let bookmarks = state.store.list_for_user(user_id).await.map_err(|e| {
        error!("Failed to list bookmarks: {:?}", e);
        port_failure(e)
    })?;

    let response: Vec<BookmarkResponse> =
        bookmarks.into_iter().map(BookmarkResponse::from).collect();
    Ok(Json(response))
}

/// Delete one of the caller's bookmarks.
///
/// The authenticated user id is part of the delete filter, so another
/// user's bookmark id answers 404 rather than deleting anything.
#[utoipa::path(
    delete,
    path = "/bookmarks/{id}",
    params(
        ("id" = Uuid, Path, description = "The bookmark to delete")
    ),
    responses(
        (status = 204, description = "Bookmark deleted"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 404, description = "No such bookmark owned by the caller", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
pub async fn delete_bookmark_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiFailure> {
    state.store.delete(id, user_id).await.map_err(|e| {
        error!("Failed to delete bookmark {}: {:?}", id, e);
        port_failure(e)
    })?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_stable_statuses() {
        let (status, _) = port_failure(PortError::InvalidUrl("x".into()));
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = port_failure(PortError::NotFound("x".into()));
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = port_failure(PortError::Unauthorized);
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn internal_causes_are_not_leaked() {
        let (status, Json(body)) = port_failure(PortError::Upstream("secret details".into()));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "internal error");
    }
}
