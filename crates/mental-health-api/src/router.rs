use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/ask_mental_health_agent",
            post(handlers::agent::ask_mental_health_agent),
        )
        .route(
            "/generate_health_report",
            post(handlers::agent::generate_health_report),
        )
        .route(
            "/clear_conversation",
            post(handlers::agent::clear_conversation),
        )
        .with_state(state)
        // CORS: any origin, every route
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        // Tracing
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CatchPanicLayer::new())
        .layer(DefaultBodyLimit::max(1024 * 1024))
}
