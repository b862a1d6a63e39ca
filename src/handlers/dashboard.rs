use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::models::AppState;
use crate::templates::DashboardTemplate;
use crate::utils::hostname_from_url;

use super::helpers::{build_template_globals, render_template, TemplateGlobals};

pub async fn dashboard_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);

    // The guard normally catches this; the session may still vanish in between.
    let Some(user) = current_user.clone() else {
        return Redirect::to("/login").into_response();
    };

    render_template(DashboardTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        user,
        dashboard_host: hostname_from_url(&state.dashboard_url),
        dashboard_url: state.dashboard_url.clone(),
    })
}
