use std::sync::Arc;

use crate::auth::TokenAuthority;
use crate::database::UserStore;

/// Shared request state. Both members are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenAuthority>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(tokens: TokenAuthority, users: Arc<dyn UserStore>) -> Self {
        Self {
            tokens: Arc::new(tokens),
            users,
        }
    }
}
