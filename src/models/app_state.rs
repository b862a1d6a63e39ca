use crate::config;
use crate::models::credential::CredentialTable;
use crate::services::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub credentials: CredentialTable,
    /// Outbound analytics dashboard link, opened in a new tab.
    pub dashboard_url: String,
    pub custom_css: Option<String>,
}

impl AppState {
    pub fn new(credentials: CredentialTable, dashboard_url: impl Into<String>) -> Self {
        Self {
            sessions: SessionStore::new(),
            credentials,
            dashboard_url: dashboard_url.into(),
            custom_css: None,
        }
    }

    /// State built from the environment (`.env` already loaded).
    pub fn from_env() -> Self {
        Self::new(CredentialTable::builtin(), config::get_dashboard_url())
    }
}
