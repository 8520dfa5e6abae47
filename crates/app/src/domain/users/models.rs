//! User Models

use std::fmt;

use jiff::Timestamp;

use crate::uuids::TypedUuid;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// User Model
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub uuid: UserUuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Registration input. The password is kept out of `Debug` output.
#[derive(Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

/// Login input. The password is kept out of `Debug` output.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"**redacted**")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_passwords() {
        let new_user = NewUser {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let rendered = format!("{new_user:?}");

        assert!(
            !rendered.contains("hunter2"),
            "password leaked into Debug output: {rendered}"
        );

        let credentials = Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };

        let rendered = format!("{credentials:?}");

        assert!(
            !rendered.contains("hunter2"),
            "password leaked into Debug output: {rendered}"
        );
    }
}
