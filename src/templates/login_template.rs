use askama::Template;

use crate::models::{FlashMessage, Role, User};

/// An entry in the role picker.
pub struct RoleOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<User>,
    pub flash_messages: Vec<FlashMessage>,
    pub has_flash_messages: bool,
    pub roles: Vec<RoleOption>,
    pub selected_role: Option<Role>,
    /// Email pre-filled from the selected role.
    pub email: String,
    pub error: Option<String>,
}

crate::impl_base_template!(LoginTemplate);
