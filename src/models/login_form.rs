use serde::Deserialize;

use crate::models::role::Role;
use crate::services::AuthError;

#[derive(Deserialize, Debug, Default, Clone)]
pub struct LoginForm {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct LoginQuery {
    pub role: Option<String>,
}

impl LoginForm {
    /// Field checks that run before the credential lookup. The first
    /// failing field wins.
    pub fn validate(&self) -> Result<Role, AuthError> {
        let role = Role::from_str(self.role.trim()).ok_or(AuthError::MissingRole)?;
        if !looks_like_email(&self.email) {
            return Err(AuthError::InvalidEmail);
        }
        if self.password.is_empty() {
            return Err(AuthError::MissingPassword);
        }
        Ok(role)
    }
}

/// `local@domain.tld` with no whitespace.
pub fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(role: &str, email: &str, password: &str) -> LoginForm {
        LoginForm {
            role: role.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn valid_form_yields_role() {
        let f = form("operator", "parikshit@gmail.com", "12345");
        assert_eq!(f.validate(), Ok(Role::Operator));
    }

    #[test]
    fn role_checked_first() {
        assert_eq!(form("", "", "").validate(), Err(AuthError::MissingRole));
        assert_eq!(
            form("owner", "harsh@gmail.com", "12345").validate(),
            Err(AuthError::MissingRole)
        );
    }

    #[test]
    fn email_checked_before_password() {
        assert_eq!(
            form("supervisor", "atharvgmail.com", "").validate(),
            Err(AuthError::InvalidEmail)
        );
        assert_eq!(
            form("supervisor", "harsh@gmail.com", "").validate(),
            Err(AuthError::MissingPassword)
        );
    }

    #[test]
    fn email_shapes() {
        assert!(looks_like_email("harsh@gmail.com"));
        assert!(looks_like_email("a.b@plant.example.org"));
        assert!(!looks_like_email("harsh@gmail"));
        assert!(!looks_like_email("@gmail.com"));
        assert!(!looks_like_email("harsh@.com"));
        assert!(!looks_like_email("harsh@gmail."));
        assert!(!looks_like_email("har sh@gmail.com"));
        assert!(!looks_like_email("a@b@c.com"));
    }
}
