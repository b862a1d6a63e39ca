pub mod app_state;
pub mod credential;
pub mod flash;
pub mod login_form;
pub mod role;
pub mod user;

pub use app_state::AppState;
pub use credential::{Credential, CredentialTable, SHARED_PASSWORD};
pub use flash::{FlashKind, FlashMessage};
pub use login_form::{LoginForm, LoginQuery};
pub use role::Role;
pub use user::User;
