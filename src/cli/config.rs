use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use async_trait::async_trait;

use crate::api::ApiClient;
use crate::config;
use crate::auth::{
    CredentialError, CredentialResolver, Navigator, Session, SessionProvider, SignInRedirect, TokenStore,
};

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("CONSOLE_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("saas-console").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

fn read_optional(path: &Path) -> Result<Option<String>, CredentialError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn remove_if_present(path: &Path) -> Result<(), CredentialError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == IoErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Bare access token in `<config>/token`
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(read_optional(&self.path)?
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty()))
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        remove_if_present(&self.path)
    }
}

/// Signed-in session in `<config>/session.json`
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load_session(&self) -> Result<Option<Session>, CredentialError> {
        match read_optional(&self.path)? {
            Some(content) => Ok(Some(serde_json::from_str(&content)?)),
            None => Ok(None),
        }
    }

    pub fn save_session(&self, session: &Session) -> Result<(), CredentialError> {
        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Whether the session file was written longer than `max_age` ago
    pub fn is_older_than(&self, max_age: Duration) -> bool {
        fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .map(|age| age > max_age)
            .unwrap_or(false)
    }
}

#[async_trait]
impl SessionProvider for FileSessionStore {
    async fn session(&self) -> Result<Option<Session>, CredentialError> {
        self.load_session()
    }
}

/// Lets the 401 handler wipe the session file as well
impl TokenStore for FileSessionStore {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.load_session()?.map(|s| s.access_token))
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        match self.load_session()? {
            Some(mut session) => {
                session.access_token = token.to_string();
                self.save_session(&session)
            }
            None => Err(CredentialError::Unavailable(
                "no session to attach the token to".to_string(),
            )),
        }
    }

    fn clear(&self) -> Result<(), CredentialError> {
        remove_if_present(&self.path)
    }
}

/// A terminal has no sign-in page; point the user at the login command
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate(&self, path: &str) {
        eprintln!("Session expired or invalid ({}). Run `console auth login <email>` to sign in again.", path);
    }
}

fn session_max_age(hours: u64) -> Duration {
    Duration::from_secs(hours.saturating_mul(3600))
}

/// Everything a command needs to talk to the backend as the stored user
pub struct CliContext {
    pub client: ApiClient,
    pub tokens: Arc<FileTokenStore>,
    pub sessions: Arc<FileSessionStore>,
}

impl CliContext {
    pub fn load() -> anyhow::Result<Self> {
        let dir = get_config_dir()?;
        Ok(Self::in_dir(&dir))
    }

    pub fn in_dir(dir: &Path) -> Self {
        let tokens = Arc::new(FileTokenStore::new(dir.join("token")));
        let sessions = Arc::new(FileSessionStore::new(dir.join("session.json")));

        let resolver = CredentialResolver::new()
            .with_store(tokens.clone())
            .with_session(sessions.clone());
        let redirect = SignInRedirect::new(Arc::new(TerminalNavigator))
            .clearing(tokens.clone())
            .clearing(sessions.clone());

        let client = ApiClient::from_config()
            .with_credentials(Arc::new(resolver))
            .with_unauthorized_handler(Arc::new(redirect));

        Self {
            client,
            tokens,
            sessions,
        }
    }

    pub fn session(&self) -> anyhow::Result<Option<Session>> {
        Ok(self.sessions.load_session()?)
    }

    /// Token past its `exp`, or a session file older than the configured
    /// maximum age
    pub fn is_expired(&self, session: &Session) -> bool {
        let max_age = session_max_age(config::config().auth.session_max_age_hours);
        session.is_expired() || self.sessions.is_older_than(max_age)
    }

    /// The stored session, if it may open `route`
    pub fn require_route(&self, route: &str) -> anyhow::Result<Session> {
        let session = self
            .session()?
            .ok_or_else(|| anyhow::anyhow!("Not logged in. Run `console auth login <email>` first"))?;

        if self.is_expired(&session) {
            anyhow::bail!("Session expired. Run `console auth login <email>` again");
        }
        if !session.can_access(route) {
            anyhow::bail!(
                "Access denied: {} ({}) may not open {}",
                session.email,
                session.authority.join(", "),
                route
            );
        }
        Ok(session)
    }

    pub fn remember(&self, session: &Session) -> anyhow::Result<()> {
        self.sessions.save_session(session)?;
        self.tokens.save(&session.access_token)?;
        Ok(())
    }

    pub fn forget(&self) -> anyhow::Result<()> {
        self.tokens.clear()?;
        self.sessions.clear()?;
        Ok(())
    }
}
