use std::sync::{Arc, Mutex};

use super::credentials::TokenStore;
use crate::config;

/// Moves the user to another console location
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Called by the request client for every 401 response
pub trait UnauthorizedHandler: Send + Sync {
    fn on_unauthorized(&self, url: &str);
}

/// Clears locally held credentials and sends the user to sign-in
pub struct SignInRedirect {
    stores: Vec<Arc<dyn TokenStore>>,
    navigator: Arc<dyn Navigator>,
    sign_in_path: String,
}

impl SignInRedirect {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            stores: Vec::new(),
            navigator,
            sign_in_path: config::config().auth.sign_in_path.clone(),
        }
    }

    pub fn clearing(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.stores.push(store);
        self
    }

    pub fn sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = path.into();
        self
    }
}

impl UnauthorizedHandler for SignInRedirect {
    fn on_unauthorized(&self, url: &str) {
        tracing::warn!("Token expired or invalid for {}, redirecting to {}", url, self.sign_in_path);

        for store in &self.stores {
            if let Err(e) = store.clear() {
                tracing::warn!("Failed to clear stored credential: {}", e);
            }
        }

        self.navigator.navigate(&self.sign_in_path);
    }
}

/// Navigator that only records where it was asked to go
#[derive(Debug, Default)]
pub struct NavigationLog {
    visits: Mutex<Vec<String>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.visits().pop()
    }
}

impl Navigator for NavigationLog {
    fn navigate(&self, path: &str) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(path.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::credentials::MemoryTokenStore;

    #[test]
    fn clears_every_store_and_navigates_once() {
        let first = Arc::new(MemoryTokenStore::with_token("a"));
        let second = Arc::new(MemoryTokenStore::with_token("b"));
        let log = Arc::new(NavigationLog::new());

        let redirect = SignInRedirect::new(log.clone())
            .clearing(first.clone())
            .clearing(second.clone())
            .sign_in_path("/sign-in");

        redirect.on_unauthorized("http://api/superadmin/companies");

        assert_eq!(first.load().unwrap(), None);
        assert_eq!(second.load().unwrap(), None);
        assert_eq!(log.visits(), vec!["/sign-in".to_string()]);
    }
}
