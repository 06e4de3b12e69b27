use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use umbra_ports::Clock;

use super::handlers;
use crate::data_api::DataApi;

/// Path prefix of every function
pub const FUNCTIONS_PREFIX: &str = "/functions/v1";

/// Application state shared across handlers
pub struct AppState<D: DataApi, C: Clock> {
    pub data_api: Arc<D>,
    pub clock: Arc<C>,
    /// Delay before a deposit is marked confirmed
    pub confirmation_delay: Duration,
}

impl<D: DataApi, C: Clock> AppState<D, C> {
    pub fn new(data_api: Arc<D>, clock: Arc<C>, confirmation_delay: Duration) -> Self {
        AppState {
            data_api,
            clock,
            confirmation_delay,
        }
    }
}

/// Create the functions router
pub fn create_router<D: DataApi + 'static, C: Clock + 'static>(
    state: Arc<AppState<D, C>>,
) -> Router {
    let functions = Router::new()
        .route(
            "/activate-agent",
            post(handlers::activate_agent::<D, C>).options(handlers::preflight),
        )
        .route(
            "/create-deposit",
            post(handlers::create_deposit::<D, C>).options(handlers::preflight),
        )
        .route(
            "/generate-stealth-address",
            post(handlers::generate_stealth_address::<D, C>).options(handlers::preflight),
        )
        .route(
            "/get-pool-stats",
            get(handlers::get_pool_stats::<D, C>)
                .post(handlers::get_pool_stats::<D, C>)
                .options(handlers::preflight),
        );

    Router::new()
        .nest(FUNCTIONS_PREFIX, functions)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
