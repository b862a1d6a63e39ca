// Base template trait shared by every page
pub mod base_template;
pub use base_template::BaseTemplate;

pub mod login_template;
pub mod dashboard_template;

pub use login_template::{LoginTemplate, RoleOption};
pub use dashboard_template::DashboardTemplate;
