use std::sync::Arc;

use quickadmin_users::{InMemoryUserService, UserService};

/// Services shared by all handlers.
#[derive(Clone)]
pub struct AppServices {
    users: Arc<dyn UserService>,
}

impl AppServices {
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }

    /// Dev wiring: everything in memory.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryUserService::new()))
    }

    pub fn users(&self) -> &dyn UserService {
        self.users.as_ref()
    }
}
