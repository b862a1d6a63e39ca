pub mod error;
pub mod session;
pub mod session_store;

// Re-export commonly used items
pub use error::AuthError;
pub use session::Session;
pub use session_store::{random_session_id, SessionStore};
