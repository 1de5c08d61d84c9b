//! # Launchpad API
//!
//! JSON endpoints over the catalog, the query pipeline and the favorites
//! store. Every launch listing request builds a fresh `BrowseSession` from
//! its query string, so the server itself holds no per-client page state.

pub mod favorites;

use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{header, Response, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use launchpad_core::catalog::{CatalogSnapshot, CatalogSource};
use launchpad_core::config::LaunchpadConfig;
use launchpad_core::query::{BrowseSession, BrowseView, FilterSpec, LaunchItem, PageItem, ViewState};
use launchpad_core::state::FavoritesHandle;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

/// Application state
pub struct AppState {
    pub catalog: Arc<CatalogSource>,
    pub favorites: FavoritesHandle,
    pub config: LaunchpadConfig,
}

pub type SharedState = Arc<AppState>;

// === API Types ===

#[derive(Serialize, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}

type ApiError = (StatusCode, Json<ApiResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ApiResponse {
            success: false,
            message: message.into(),
        }),
    )
}

/// Query string of the launch listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LaunchQuery {
    /// Case-insensitive substring of the mission name
    pub search: Option<String>,
    /// Four-digit year, or "all"
    pub year: Option<String>,
    pub success_only: Option<bool>,
    pub favorites_only: Option<bool>,
    /// 1-based page, clamped into range
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl LaunchQuery {
    fn filter_spec(&self) -> FilterSpec {
        FilterSpec {
            search: self.search.clone().unwrap_or_default(),
            year: self.year.as_deref().unwrap_or_default().into(),
            success_only: self.success_only.unwrap_or(false),
            favorites_only: self.favorites_only.unwrap_or(false),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LaunchResponse {
    pub id: String,
    pub name: String,
    pub date_utc: String,
    pub year: String,
    pub rocket_id: String,
    pub rocket_name: String,
    /// "Successful", "Failed" or "Upcoming"
    pub status: String,
    pub details: Option<String>,
    pub patch_small: Option<String>,
    pub patch_large: Option<String>,
    pub webcast: Option<String>,
    pub wikipedia: Option<String>,
    pub is_favorite: bool,
}

impl From<LaunchItem> for LaunchResponse {
    fn from(item: LaunchItem) -> Self {
        let launch = item.launch;
        Self {
            year: launch.year().to_string(),
            status: launch.outcome.label().to_string(),
            id: launch.id,
            name: launch.name,
            date_utc: launch.launch_time_utc,
            rocket_id: launch.rocket_id,
            rocket_name: item.rocket_name,
            details: launch.details,
            patch_small: launch.links.patch_small,
            patch_large: launch.links.patch_large,
            webcast: launch.links.webcast,
            wikipedia: launch.links.wikipedia,
            is_favorite: item.is_favorite,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LaunchPageResponse {
    /// "loading", "error", "empty" or "results"
    pub status: String,
    pub message: Option<String>,
    pub summary: String,
    pub items: Vec<LaunchResponse>,
    pub search: String,
    pub year: String,
    pub success_only: bool,
    pub favorites_only: bool,
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// Page strip; `null` marks an ellipsis
    pub page_numbers: Vec<Option<usize>>,
}

impl From<BrowseView> for LaunchPageResponse {
    fn from(view: BrowseView) -> Self {
        let summary = view.summary();
        let (status, message) = match view.state {
            ViewState::Loading => ("loading", None),
            ViewState::Error(message) => ("error", Some(message)),
            ViewState::Empty => ("empty", None),
            ViewState::Results => ("results", None),
        };

        Self {
            status: status.to_string(),
            message,
            summary,
            items: view.items.into_iter().map(LaunchResponse::from).collect(),
            search: view.filters.search,
            year: view.filters.year.to_string(),
            success_only: view.filters.success_only,
            favorites_only: view.filters.favorites_only,
            current_page: view.pagination.current_page,
            items_per_page: view.pagination.items_per_page,
            total_items: view.pagination.total_items,
            total_pages: view.pagination.total_pages,
            page_numbers: view
                .page_numbers
                .into_iter()
                .map(|item| match item {
                    PageItem::Page(page) => Some(page),
                    PageItem::Ellipsis => None,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct YearsResponse {
    pub years: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogStatusResponse {
    pub loading: bool,
    pub error: Option<String>,
    pub total: usize,
    pub revision: u64,
}

impl From<&CatalogSnapshot> for CatalogStatusResponse {
    fn from(snapshot: &CatalogSnapshot) -> Self {
        Self {
            loading: snapshot.loading,
            error: snapshot.error.clone(),
            total: snapshot.launches.len(),
            revision: snapshot.revision,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Launchpad API",
        version = "1.0.0",
        description = "Browse, filter and bookmark launches from the public launch catalog"
    ),
    paths(
        list_launches,
        get_launch,
        list_years,
        get_catalog_status,
        reload_catalog,
        favorites::list_favorites,
        favorites::add_favorite,
        favorites::remove_favorite
    ),
    components(
        schemas(
            ApiResponse,
            LaunchResponse,
            LaunchPageResponse,
            YearsResponse,
            CatalogStatusResponse,
            favorites::FavoritesResponse
        )
    ),
    tags(
        (name = "launches", description = "Filtered, paginated launch listing"),
        (name = "catalog", description = "Catalog load state and retry"),
        (name = "favorites", description = "Persisted favorite launches")
    )
)]
pub struct ApiDoc;

// === API Handlers ===

/// List launches through the filter and pagination pipeline
#[utoipa::path(
    get,
    path = "/api/v1/launches",
    tag = "launches",
    params(LaunchQuery),
    responses(
        (status = 200, description = "One page of matching launches", body = LaunchPageResponse),
        (status = 400, description = "Invalid page size", body = ApiResponse)
    )
)]
pub async fn list_launches(
    State(state): State<SharedState>,
    Query(query): Query<LaunchQuery>,
) -> Result<Json<LaunchPageResponse>, ApiError> {
    let per_page = query.per_page.unwrap_or(state.config.items_per_page);
    if per_page == 0 {
        return Err(api_error(StatusCode::BAD_REQUEST, "per_page must be at least 1"));
    }

    let snapshot = state.catalog.snapshot().await;
    let mut session = BrowseSession::new(Arc::clone(&state.favorites), per_page);
    session.set_filters(query.filter_spec());
    session.sync(&snapshot);
    if let Some(page) = query.page {
        session.set_page(page);
    }

    Ok(Json(session.view(&snapshot).into()))
}

/// Get one launch by id
#[utoipa::path(
    get,
    path = "/api/v1/launches/{id}",
    tag = "launches",
    params(("id" = String, Path, description = "Launch ID")),
    responses(
        (status = 200, description = "Launch details", body = LaunchResponse),
        (status = 404, description = "No such launch", body = ApiResponse)
    )
)]
pub async fn get_launch(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<LaunchResponse>, ApiError> {
    let snapshot = state.catalog.snapshot().await;
    let launch = snapshot
        .find(&id)
        .cloned()
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Launch {} not found", id)))?;

    let item = LaunchItem::new(launch, &snapshot, &state.favorites);
    Ok(Json(item.into()))
}

/// Distinct launch years, newest first
#[utoipa::path(
    get,
    path = "/api/v1/years",
    tag = "launches",
    responses(
        (status = 200, description = "Available years", body = YearsResponse)
    )
)]
pub async fn list_years(State(state): State<SharedState>) -> Json<YearsResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(YearsResponse {
        years: snapshot.available_years(),
    })
}

/// Catalog load state
#[utoipa::path(
    get,
    path = "/api/v1/catalog/status",
    tag = "catalog",
    responses(
        (status = 200, description = "Current load state", body = CatalogStatusResponse)
    )
)]
pub async fn get_catalog_status(State(state): State<SharedState>) -> Json<CatalogStatusResponse> {
    let snapshot = state.catalog.snapshot().await;
    Json(CatalogStatusResponse::from(&snapshot))
}

/// Re-run the full catalog load
#[utoipa::path(
    post,
    path = "/api/v1/catalog/reload",
    tag = "catalog",
    responses(
        (status = 200, description = "Catalog reloaded", body = CatalogStatusResponse),
        (status = 502, description = "Upstream retrieval failed", body = ApiResponse)
    )
)]
pub async fn reload_catalog(
    State(state): State<SharedState>,
) -> Result<Json<CatalogStatusResponse>, ApiError> {
    state
        .catalog
        .load()
        .await
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, format!("Failed to fetch data: {}", e)))?;

    let snapshot = state.catalog.snapshot().await;
    Ok(Json(CatalogStatusResponse::from(&snapshot)))
}

async fn serve_openapi() -> impl IntoResponse {
    match ApiDoc::openapi().to_json() {
        Ok(spec) => Response::builder()
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(spec))
            .unwrap_or_default(),
        Err(e) => {
            tracing::error!("Failed to render OpenAPI document: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the full application router
pub fn router(state: SharedState) -> Router {
    let launch_routes = Router::new()
        .route("/", get(list_launches))
        .route("/:id", get(get_launch));

    let catalog_routes = Router::new()
        .route("/status", get(get_catalog_status))
        .route("/reload", post(reload_catalog));

    Router::new()
        .nest("/api/v1/launches", launch_routes)
        .nest("/api/v1/catalog", catalog_routes)
        .nest("/api/v1/favorites", favorites::favorite_routes())
        .route("/api/v1/years", get(list_years))
        .route("/api/v1/openapi.json", get(serve_openapi))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::http::{Method, Request};
    use launchpad_core::catalog::StaticCatalogFetcher;
    use launchpad_core::models::{ApiLaunch, ApiLinks, ApiRocket};
    use launchpad_core::state::FavoritesStore;
    use serde_json::Value;
    use tower::ServiceExt;

    fn api_launch(i: usize, success: Option<bool>) -> ApiLaunch {
        ApiLaunch {
            id: format!("launch-{:02}", i),
            name: if i % 2 == 0 {
                format!("Starlink {}", i)
            } else {
                format!("CRS-{}", i)
            },
            date_utc: format!("{}-05-01T12:00:00.000Z", 2015 + i % 4),
            date_local: None,
            rocket: "f9".to_string(),
            success,
            details: None,
            links: ApiLinks::default(),
        }
    }

    pub(crate) fn fetcher(count: usize) -> StaticCatalogFetcher {
        let launches = (0..count)
            .map(|i| api_launch(i, if i < 13 { Some(true) } else { Some(false) }))
            .collect();
        let rockets = vec![ApiRocket {
            id: "f9".to_string(),
            name: "Falcon 9".to_string(),
        }];
        StaticCatalogFetcher::new(launches, rockets)
    }

    pub(crate) async fn test_state(fetcher: StaticCatalogFetcher, load: bool) -> SharedState {
        let catalog = Arc::new(CatalogSource::new(Arc::new(fetcher)));
        if load {
            let _ = catalog.load().await;
        }
        Arc::new(AppState {
            catalog,
            favorites: FavoritesStore::in_memory(),
            config: LaunchpadConfig::default(),
        })
    }

    pub(crate) async fn request(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();

        let response = router.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        let parsed = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, parsed)
    }

    #[tokio::test]
    async fn test_list_launches_success_only_pages() {
        let router = router(test_state(fetcher(25), true).await);

        let (status, body) =
            request(&router, Method::GET, "/api/v1/launches?success_only=true").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "results");
        assert_eq!(body["total_items"], 13);
        assert_eq!(body["total_pages"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 12);
        assert_eq!(body["items"][0]["rocket_name"], "Falcon 9");
        assert_eq!(body["items"][0]["status"], "Successful");

        let (_, body) = request(
            &router,
            Method::GET,
            "/api/v1/launches?success_only=true&page=2",
        )
        .await;
        assert_eq!(body["current_page"], 2);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_launches_filters_and_clamps_page() {
        let router = router(test_state(fetcher(25), true).await);

        let (_, body) = request(
            &router,
            Method::GET,
            "/api/v1/launches?search=STARLINK&year=2015&page=99",
        )
        .await;
        assert_eq!(body["year"], "2015");
        assert_eq!(body["current_page"], 1);
        let items = body["items"].as_array().unwrap();
        assert!(!items.is_empty());
        assert!(items
            .iter()
            .all(|item| item["name"].as_str().unwrap().starts_with("Starlink")
                && item["year"] == "2015"));
    }

    #[tokio::test]
    async fn test_list_launches_rejects_zero_page_size() {
        let router = router(test_state(fetcher(3), true).await);
        let (status, body) = request(&router, Method::GET, "/api/v1/launches?per_page=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_failed_catalog_reports_error_and_reload_retries() {
        let router = router(test_state(fetcher(5).fail_launches(500), true).await);

        let (_, body) = request(&router, Method::GET, "/api/v1/launches").await;
        assert_eq!(body["status"], "error");
        assert!(body["items"].as_array().unwrap().is_empty());

        let (_, body) = request(&router, Method::GET, "/api/v1/catalog/status").await;
        assert_eq!(body["loading"], false);
        assert_eq!(body["total"], 0);
        assert!(body["error"].as_str().unwrap().starts_with("Failed to fetch data"));

        let (status, _) = request(&router, Method::POST, "/api/v1/catalog/reload").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_listing_before_first_load_reports_loading() {
        let router = router(test_state(fetcher(4), false).await);

        let (status, body) = request(&router, Method::GET, "/api/v1/launches").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "loading");
        assert!(body["items"].as_array().unwrap().is_empty());

        let (_, body) = request(&router, Method::GET, "/api/v1/catalog/status").await;
        assert_eq!(body["loading"], true);
    }

    #[tokio::test]
    async fn test_reload_loads_catalog() {
        let router = router(test_state(fetcher(4), false).await);

        let (_, body) = request(&router, Method::GET, "/api/v1/catalog/status").await;
        assert_eq!(body["total"], 0);
        assert_eq!(body["revision"], 0);

        let (status, body) = request(&router, Method::POST, "/api/v1/catalog/reload").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 4);
        assert_eq!(body["revision"], 1);
    }

    #[tokio::test]
    async fn test_get_launch_and_years() {
        let router = router(test_state(fetcher(6), true).await);

        let (status, body) = request(&router, Method::GET, "/api/v1/launches/launch-03").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "CRS-3");
        assert_eq!(body["is_favorite"], false);

        let (status, _) = request(&router, Method::GET, "/api/v1/launches/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = request(&router, Method::GET, "/api/v1/years").await;
        assert_eq!(
            body["years"],
            serde_json::json!(["2018", "2017", "2016", "2015"])
        );
    }

    #[tokio::test]
    async fn test_openapi_document_lists_paths() {
        let router = router(test_state(fetcher(0), false).await);
        let (status, body) = request(&router, Method::GET, "/api/v1/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/v1/launches"].is_object());
        assert!(body["paths"]["/api/v1/favorites/{id}"].is_object());
    }
}
