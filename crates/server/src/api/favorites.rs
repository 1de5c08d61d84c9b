//! # Favorites API
//!
//! Read and toggle the persisted favorite launch ids.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use utoipa::ToSchema;

use super::{api_error, ApiError, ApiResponse, SharedState};

#[derive(Debug, Serialize, ToSchema)]
pub struct FavoritesResponse {
    pub ids: Vec<String>,
    /// Whether the request changed the set
    pub changed: bool,
}

pub fn favorite_routes() -> Router<SharedState> {
    Router::new()
        .route("/", get(list_favorites))
        .route("/:id", put(add_favorite).delete(remove_favorite))
}

/// List favorite launch ids
#[utoipa::path(
    get,
    path = "/api/v1/favorites",
    tag = "favorites",
    responses(
        (status = 200, description = "Favorite ids in insertion order", body = FavoritesResponse)
    )
)]
pub async fn list_favorites(State(state): State<SharedState>) -> Json<FavoritesResponse> {
    Json(FavoritesResponse {
        ids: state.favorites.list(),
        changed: false,
    })
}

/// Mark a launch as favorite
#[utoipa::path(
    put,
    path = "/api/v1/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "Launch ID")),
    responses(
        (status = 200, description = "Favorite stored", body = FavoritesResponse),
        (status = 500, description = "Could not persist favorites", body = ApiResponse)
    )
)]
pub async fn add_favorite(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let changed = state
        .favorites
        .add(&id)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(FavoritesResponse {
        ids: state.favorites.list(),
        changed,
    }))
}

/// Unmark a favorite
#[utoipa::path(
    delete,
    path = "/api/v1/favorites/{id}",
    tag = "favorites",
    params(("id" = String, Path, description = "Launch ID")),
    responses(
        (status = 200, description = "Favorite removed", body = FavoritesResponse),
        (status = 500, description = "Could not persist favorites", body = ApiResponse)
    )
)]
pub async fn remove_favorite(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let changed = state
        .favorites
        .remove(&id)
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(FavoritesResponse {
        ids: state.favorites.list(),
        changed,
    }))
}
