//! User account entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quickadmin_core::UserId;

/// Account state flag for a usable account.
pub const STATE_ACTIVE: &str = "1";

/// A user account as submitted by administrators.
///
/// `create_time` and `state` are audit fields owned by the server; whatever
/// the client sends for them is overwritten by [`User::stamp_created`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub password: Option<String>,
    pub create_time: Option<DateTime<Utc>>,
    pub state: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the audit fields for a freshly created account.
    pub fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.create_time = Some(now);
        self.state = Some(STATE_ACTIVE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickadmin_core::util::object::{Comparison, is_same, part_copy_new};

    #[test]
    fn stamping_sets_audit_fields_only() {
        let before = User::new("alice").with_password("pw");
        let mut after = before.clone();
        after.stamp_created(Utc::now());

        assert_eq!(after.state.as_deref(), Some(STATE_ACTIVE));
        assert!(after.create_time.is_some());
        assert!(is_same(Some(&before), Some(&after), Comparison::Strict, &["id", "username", "password"]).unwrap());
        assert!(!is_same(Some(&before), Some(&after), Comparison::Strict, &[]).unwrap());
    }

    #[test]
    fn json_uses_camel_case_property_names() {
        let mut user = User::new("alice");
        user.stamp_created(Utc::now());
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("createTime").is_some());
        assert_eq!(json["state"], "1");
    }

    #[test]
    fn partial_copy_keeps_selected_fields() {
        let user = User::new("alice").with_password("pw");
        let copy: User = part_copy_new(&user, &["username"]).unwrap();
        assert_eq!(copy.username, "alice");
        assert_eq!(copy.password, None);
        assert_ne!(copy.id, user.id);
    }
}
