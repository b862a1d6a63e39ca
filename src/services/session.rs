use crate::models::{CredentialTable, User};

/// Authentication state of a single page session.
///
/// Either empty or holding exactly one authenticated [`User`].
#[derive(Clone, Debug, Default)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signs in when `(email, password)` exactly matches a row of `table`.
    ///
    /// On failure the session is left as it was.
    pub fn login(&mut self, table: &CredentialTable, email: &str, password: &str) -> bool {
        match table.authenticate(email, password) {
            Some(user) => {
                self.user = Some(user);
                true
            }
            None => false,
        }
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
