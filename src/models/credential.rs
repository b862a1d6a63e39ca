use serde::Serialize;

use crate::models::role::Role;
use crate::models::user::User;

pub const SHARED_PASSWORD: &str = "12345";

/// One row of the credential table: the identity a role signs in as.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Credential {
    pub role: Role,
    pub email: &'static str,
}

static BUILTIN_CREDENTIALS: [Credential; 3] = [
    Credential { role: Role::Supervisor, email: "harsh@gmail.com" },
    Credential { role: Role::ProductionManager, email: "atharv@gmail.com" },
    Credential { role: Role::Operator, email: "parikshit@gmail.com" },
];

/// Static role -> (email, shared password) mapping.
///
/// Passwords are compared as plaintext; this is a demo gate, not a
/// security boundary.
#[derive(Clone, Copy, Debug)]
pub struct CredentialTable {
    rows: &'static [Credential],
    password: &'static str,
}

impl CredentialTable {
    pub const fn new(rows: &'static [Credential], password: &'static str) -> Self {
        Self { rows, password }
    }

    /// The table compiled into the binary.
    pub fn builtin() -> Self {
        Self::new(&BUILTIN_CREDENTIALS, SHARED_PASSWORD)
    }

    pub fn rows(&self) -> &'static [Credential] {
        self.rows
    }

    /// Returns the user for an exact (email, password) match.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<User> {
        if password != self.password {
            return None;
        }
        self.rows.iter().find(|c| c.email == email).map(|c| User {
            email: c.email.to_string(),
            role: c.role,
        })
    }

    pub fn email_for(&self, role: Role) -> Option<&'static str> {
        self.rows.iter().find(|c| c.role == role).map(|c| c.email)
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        Self::builtin()
    }
}
