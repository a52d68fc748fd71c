pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod query;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::services::{
    application_service::ApplicationService, auth_service::AuthService,
    offering_service::OfferingService,
};
use crate::store::{ApplicationStore, MemoryStore, OfferingStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub offering_service: OfferingService,
    pub application_service: ApplicationService,
    pub auth_service: AuthService,
}

impl AppState {
    pub fn new(store: MemoryStore) -> Self {
        let offerings: Arc<dyn OfferingStore> = Arc::new(store.clone());
        let applications: Arc<dyn ApplicationStore> = Arc::new(store.clone());
        let users: Arc<dyn UserStore> = Arc::new(store);
        Self::with_stores(offerings, applications, users)
    }

    /// Wire the services against any store implementation.
    pub fn with_stores(
        offerings: Arc<dyn OfferingStore>,
        applications: Arc<dyn ApplicationStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        let offering_service = OfferingService::new(offerings.clone(), users.clone());
        let application_service = ApplicationService::new(applications, offerings, users.clone());
        let auth_service = AuthService::new(users);

        Self {
            offering_service,
            application_service,
            auth_service,
        }
    }
}

/// Assemble the full application router. Requires an initialized config.
pub fn build_router(state: AppState) -> Router {
    let config = config::get_config();

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/offerings", get(routes::offering::list_offerings))
        .route("/api/offerings/:id", get(routes::offering::get_offering))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/logout", post(routes::auth::logout))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let account_api = Router::new()
        .route("/api/offerings", post(routes::offering::create_offering))
        .route(
            "/api/offerings/:id",
            put(routes::offering::update_offering).delete(routes::offering::delete_offering),
        )
        .route(
            "/api/offerings/:id/apply",
            post(routes::application::apply_to_offering),
        )
        .route(
            "/api/offerings/:id/applied",
            get(routes::application::check_applied),
        )
        .route(
            "/api/offerings/:id/applicants",
            get(routes::application::list_applicants),
        )
        .route("/api/auth/profile", get(routes::auth::profile))
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.auth_rps),
            middleware::rate_limit::rps_middleware,
        ));

    base_routes
        .merge(public_api)
        .merge(account_api)
        .with_state(state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
}
