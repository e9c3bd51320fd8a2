use axum::{
    Json,
    Router,
    http::{HeaderValue, StatusCode},
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, CrewService, JwtAuthService, PirateGroupService, SeaOrmCrewService,
    SeaOrmPirateGroupService,
};

mod assets;
pub mod auth;
pub mod common;
pub mod crew;
mod error;
pub mod pirate_groups;
mod types;

pub use error::ApiError;
pub use types::ApiResponse;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub crew_service: Arc<dyn CrewService>,

    pub group_service: Arc<dyn PirateGroupService>,

    pub auth_service: Arc<dyn AuthService>,

    pub config: Config,
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_url,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    Ok(create_app_state(store, config))
}

#[must_use]
pub fn create_app_state(store: Store, config: Config) -> Arc<AppState> {
    let crew_service = Arc::new(SeaOrmCrewService::new(store.clone()));
    let group_service = Arc::new(SeaOrmPirateGroupService::new(store.clone()));
    let auth_service = Arc::new(JwtAuthService::new(
        store.clone(),
        config.auth.jwt_secret.clone(),
        config.auth.token_expiry_hours,
    ));

    Arc::new(AppState {
        store,
        crew_service,
        group_service,
        auth_service,
        config,
    })
}

pub fn router(state: Arc<AppState>) -> Router {
    let images_path = state.config.general.images_path.clone();
    let cors_origins = state.config.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .route("/auth/login", post(auth::login))
        .route("/auth/verify", get(auth::verify))
        .route("/crew", get(crew::list_members))
        .route("/crew", post(crew::create_member))
        .route("/crew/search", get(crew::search_members))
        .route("/crew/{id}", get(crew::get_member))
        .route("/crew/{id}", put(crew::update_member))
        .route("/crew/{id}", delete(crew::delete_member))
        .route("/pirate-groups", get(pirate_groups::list_groups))
        .route("/pirate-groups", post(pirate_groups::create_group))
        .route("/pirate-groups/search", get(pirate_groups::search_groups))
        .route("/pirate-groups/{id}", get(pirate_groups::get_group))
        .route("/pirate-groups/{id}", put(pirate_groups::update_group))
        .route("/pirate-groups/{id}", delete(pirate_groups::delete_group))
        .route(
            "/pirate-groups/{id}/members",
            get(pirate_groups::list_group_members),
        )
        .route("/common/ping", get(common::ping))
        .route("/common/version", get(common::version))
        .fallback(api_not_found)
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service("/images", tower_http::services::ServeDir::new(images_path))
        .fallback(assets::serve_asset)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

async fn api_not_found() -> (StatusCode, Json<ApiResponse<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::error("API endpoint not found")),
    )
}
