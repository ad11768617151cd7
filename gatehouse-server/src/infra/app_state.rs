use std::{fmt, sync::Arc};

use gatehouse_core::auth::PasswordCrypto;
use gatehouse_core::store::UserStore;

use crate::infra::config::Config;

/// Shared per-request state: the credential store handle, the password
/// hasher, and the loaded configuration. Everything is behind an `Arc`, so
/// cloning per request is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub crypto: Arc<PasswordCrypto>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
