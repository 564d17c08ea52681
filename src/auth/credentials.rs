use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Credential store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Credential store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),
}

/// Client-side persisted access token (the console's equivalent of browser
/// storage). Cleared when the backend rejects the token.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, CredentialError>;
    fn save(&self, token: &str) -> Result<(), CredentialError>;
    fn clear(&self) -> Result<(), CredentialError>;
}

/// The active identity session
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn session(&self) -> Result<Option<Session>, CredentialError>;
}

/// Resolves the bearer token for a request
#[async_trait]
pub trait CredentialSource: Send + Sync {
    async fn access_token(&self) -> Result<Option<String>, CredentialError>;
}

/// Persisted token first, then the active session
#[derive(Clone, Default)]
pub struct CredentialResolver {
    store: Option<Arc<dyn TokenStore>>,
    session: Option<Arc<dyn SessionProvider>>,
}

impl CredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_session(mut self, session: Arc<dyn SessionProvider>) -> Self {
        self.session = Some(session);
        self
    }
}

#[async_trait]
impl CredentialSource for CredentialResolver {
    async fn access_token(&self) -> Result<Option<String>, CredentialError> {
        if let Some(store) = &self.store {
            if let Some(token) = store.load()?.filter(|t| !t.is_empty()) {
                return Ok(Some(token));
            }
        }

        if let Some(provider) = &self.session {
            let session = provider.session().await?;
            return Ok(session
                .map(|s| s.access_token)
                .filter(|t| !t.is_empty()));
        }

        Ok(None)
    }
}

/// In-memory token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, CredentialError> {
        self.token
            .lock()
            .map_err(|_| CredentialError::Unavailable("token store lock poisoned".to_string()))
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        *self.lock()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        *self.lock()? = None;
        Ok(())
    }
}

/// A fixed session, e.g. one handed over by an embedding application
#[derive(Debug, Clone, Default)]
pub struct StaticSession(pub Option<Session>);

#[async_trait]
impl SessionProvider for StaticSession {
    async fn session(&self) -> Result<Option<Session>, CredentialError> {
        Ok(self.0.clone())
    }
}
