use askama::Template;

use crate::models::{FlashMessage, User};

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: Option<User>,
    pub flash_messages: Vec<FlashMessage>,
    pub has_flash_messages: bool,
    pub user: User,
    pub dashboard_url: String,
    pub dashboard_host: String,
}

crate::impl_base_template!(DashboardTemplate);
