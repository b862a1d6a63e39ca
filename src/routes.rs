use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
pub const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

pub fn build_app(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::dashboard_get))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            handlers::middleware::auth_middleware,
        ));

    // Serve the custom stylesheet if one was loaded, otherwise the embedded default
    let stylesheet_content = state
        .custom_css
        .clone()
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    let static_routes = Router::new()
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            }),
        )
        .layer(
            ServiceBuilder::new().layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400"),
            )),
        );

    Router::new()
        .route("/", get(handlers::auth::root_get))
        .route(
            "/login",
            get(handlers::auth::login_get).post(handlers::auth::login_post),
        )
        .route("/logout", post(handlers::auth::logout_post))
        .merge(protected_routes)
        .merge(static_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
