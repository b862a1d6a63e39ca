use serde::{Deserialize, Serialize};

use crate::models::role::Role;

/// The authenticated identity held by a session.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub email: String,
    pub role: Role,
}
