use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::handlers::helpers::current_user_from_jar;
use crate::models::AppState;

/// Routing guard for protected pages: no session, no entry.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if current_user_from_jar(&state, &jar).is_some() {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "No session; redirecting to login");
        Redirect::to("/login").into_response()
    }
}
