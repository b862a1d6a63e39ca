use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::SESSION_COOKIE;
use crate::models::{AppState, FlashMessage, Role, User};
use crate::templates::{BaseTemplate, RoleOption};

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn current_user_from_jar(state: &AppState, jar: &CookieJar) -> Option<User> {
    let sid = session_id_from_jar(jar)?;
    state.sessions.current_user(&sid)
}

pub fn take_flash_messages(state: &AppState, jar: &CookieJar) -> Vec<FlashMessage> {
    match session_id_from_jar(jar) {
        Some(sid) => state.sessions.take_flash(&sid),
        None => vec![],
    }
}

pub fn session_cookie(sid: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, sid);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

pub fn expired_session_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub current_user: Option<User>,
    pub flash_messages: Vec<FlashMessage>,
    pub has_flash_messages: bool,
}

pub fn build_template_globals(state: &AppState, jar: &CookieJar) -> TemplateGlobals {
    let current_user = current_user_from_jar(state, jar);
    let flash_messages = take_flash_messages(state, jar);
    let has_flash_messages = !flash_messages.is_empty();
    TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    }
}

pub fn role_options(selected: Option<Role>) -> Vec<RoleOption> {
    Role::all()
        .iter()
        .map(|role| RoleOption {
            value: role.as_str(),
            label: role.label(),
            selected: Some(*role) == selected,
        })
        .collect()
}

pub fn render_template<T: askama::Template + BaseTemplate>(t: T) -> Response {
    tracing::debug!(
        authenticated = t.current_user().is_some(),
        toasts = t.flash_messages().len(),
        "Rendering page"
    );
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_options_mark_selection() {
        let opts = role_options(Some(Role::ProductionManager));
        assert_eq!(opts.len(), 3);
        let selected: Vec<_> = opts.iter().filter(|o| o.selected).map(|o| o.value).collect();
        assert_eq!(selected, vec!["production_manager"]);
        assert!(role_options(None).iter().all(|o| !o.selected));
    }

    #[test]
    fn session_cookie_is_http_only_and_site_wide() {
        let c = session_cookie("abc".into());
        assert_eq!(c.name(), SESSION_COOKIE);
        assert_eq!(c.value(), "abc");
        assert_eq!(c.path(), Some("/"));
        assert_eq!(c.http_only(), Some(true));
        assert_eq!(c.same_site(), Some(SameSite::Lax));
    }
}
