use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::models::{AppState, FlashMessage, LoginForm, LoginQuery, Role};
use crate::services::AuthError;
use crate::templates::LoginTemplate;

use super::helpers::{
    build_template_globals, current_user_from_jar, expired_session_cookie, render_template,
    role_options, session_cookie, session_id_from_jar, TemplateGlobals,
};

fn login_page(
    state: &AppState,
    jar: &CookieJar,
    selected_role: Option<Role>,
    error: Option<String>,
    extra_flash: Option<FlashMessage>,
) -> Response {
    let TemplateGlobals {
        current_user,
        mut flash_messages,
        ..
    } = build_template_globals(state, jar);
    flash_messages.extend(extra_flash);
    let email = selected_role
        .and_then(|role| state.credentials.email_for(role))
        .unwrap_or_default()
        .to_string();
    render_template(LoginTemplate {
        current_user,
        has_flash_messages: !flash_messages.is_empty(),
        flash_messages,
        roles: role_options(selected_role),
        selected_role,
        email,
        error,
    })
}

pub async fn login_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<LoginQuery>,
) -> Response {
    if current_user_from_jar(&state, &jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    let selected = query.role.as_deref().and_then(Role::from_str);
    login_page(&state, &jar, selected, None, None)
}

pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let previous_sid = session_id_from_jar(&jar);
    let outcome = form.validate().and_then(|_| {
        state.sessions.login(
            previous_sid.as_deref(),
            &state.credentials,
            &form.email,
            &form.password,
        )
    });

    match outcome {
        Ok((sid, user)) => {
            tracing::info!(email = %user.email, role = user.role.as_str(), "Login succeeded");
            state.sessions.push_flash(
                &sid,
                FlashMessage::success("Login successful", "Welcome! Redirecting to dashboard..."),
            );
            (jar.add(session_cookie(sid)), Redirect::to("/dashboard")).into_response()
        }
        Err(err @ AuthError::InvalidCredentials) => {
            tracing::warn!(email = %form.email, "Login rejected: credentials did not match");
            let toast = FlashMessage::error("Login failed", err.to_string());
            let selected = Role::from_str(form.role.trim());
            login_page(&state, &jar, selected, Some(err.to_string()), Some(toast))
        }
        Err(err) => {
            tracing::debug!(reason = %err, "Login form invalid");
            let selected = Role::from_str(form.role.trim());
            login_page(&state, &jar, selected, Some(err.to_string()), None)
        }
    }
}

pub async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(sid) = session_id_from_jar(&jar) {
        if let Some(user) = state.sessions.logout(&sid) {
            tracing::info!(email = %user.email, "Logged out");
        }
    }
    let cleared = jar.remove(expired_session_cookie());
    (cleared, Redirect::to("/login")).into_response()
}

pub async fn root_get(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if current_user_from_jar(&state, &jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Redirect::to("/login").into_response()
}
