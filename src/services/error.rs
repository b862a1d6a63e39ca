use thiserror::Error;

/// Reasons a sign-in attempt is refused.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please select a role")]
    MissingRole,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,

    /// The (email, password) pair matches no credential row.
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
}
