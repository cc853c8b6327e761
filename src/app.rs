use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;
use crate::database::CustomerStore;
use crate::handlers::customers;
use crate::middleware::{token_auth_middleware, AuthState};

/// Per-process state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }
}

/// Router options that come from configuration
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub token: String,
    pub enable_request_logging: bool,
}

impl From<&ApiConfig> for AppOptions {
    fn from(api: &ApiConfig) -> Self {
        Self {
            token: api.token.clone(),
            enable_request_logging: api.enable_request_logging,
        }
    }
}

/// Build the full HTTP router. Every route, including the 404 fallback, sits behind the token gate.
pub fn app(state: AppState, options: &AppOptions) -> Router {
    let auth = AuthState::new(options.token.as_str());

    let router = customer_routes()
        .layer(middleware::from_fn_with_state(auth, token_auth_middleware))
        .with_state(state)
        .layer(CorsLayer::permissive());

    if options.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(customers::customers_get).post(customers::customers_post),
        )
        .route(
            "/customers/:id",
            get(customers::customer_get)
                .put(customers::customer_put)
                .delete(customers::customer_delete),
        )
}
