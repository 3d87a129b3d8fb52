//! User persistence contract and an in-memory implementation.

use std::sync::{Arc, RwLock};

use quickadmin_core::UserId;

use crate::User;

/// Persistence boundary for user accounts.
///
/// Writes report the number of affected rows; callers map that count onto
/// the response envelope.
pub trait UserService: Send + Sync {
    /// Store a new account. Returns `1` when stored, `0` when rejected.
    fn insert(&self, user: &User) -> usize;

    fn get(&self, id: &UserId) -> Option<User>;

    fn find_by_username(&self, username: &str) -> Option<User>;

    fn list(&self) -> Vec<User>;
}

impl<S> UserService for Arc<S>
where
    S: UserService + ?Sized,
{
    fn insert(&self, user: &User) -> usize {
        (**self).insert(user)
    }

    fn get(&self, id: &UserId) -> Option<User> {
        (**self).get(id)
    }

    fn find_by_username(&self, username: &str) -> Option<User> {
        (**self).find_by_username(username)
    }

    fn list(&self) -> Vec<User> {
        (**self).list()
    }
}

/// In-memory user table for tests/dev.
///
/// Usernames are unique (case-sensitive), mirroring a unique index: a
/// duplicate or blank username affects no rows.
#[derive(Debug, Default)]
pub struct InMemoryUserService {
    inner: RwLock<Vec<User>>,
}

impl InMemoryUserService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserService for InMemoryUserService {
    fn insert(&self, user: &User) -> usize {
        if user.username.trim().is_empty() {
            tracing::debug!("rejecting user with blank username");
            return 0;
        }

        let Ok(mut rows) = self.inner.write() else {
            tracing::warn!("user table lock poisoned");
            return 0;
        };

        if rows
            .iter()
            .any(|u| u.id == user.id || u.username == user.username)
        {
            tracing::debug!(username = %user.username, "duplicate user");
            return 0;
        }

        rows.push(user.clone());
        1
    }

    fn get(&self, id: &UserId) -> Option<User> {
        let rows = self.inner.read().ok()?;
        rows.iter().find(|u| u.id == *id).cloned()
    }

    fn find_by_username(&self, username: &str) -> Option<User> {
        let rows = self.inner.read().ok()?;
        rows.iter().find(|u| u.username == username).cloned()
    }

    fn list(&self) -> Vec<User> {
        match self.inner.read() {
            Ok(rows) => rows.clone(),
            Err(_) => vec![],
        }
    }
}
