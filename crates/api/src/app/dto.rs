use serde::Deserialize;

use quickadmin_users::User;

/// Form submitted to `/userManage/insert`.
///
/// Only client-owned fields are accepted; audit fields are set server-side.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub username: String,

    #[serde(default, deserialize_with = "quickadmin_core::util::json::de::empty_string_as_none")]
    pub password: Option<String>,
}

impl UserForm {
    pub fn into_user(self) -> User {
        User {
            username: self.username.trim().to_string(),
            password: self.password,
            ..User::default()
        }
    }
}
