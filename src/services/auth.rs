use crate::api::{ApiClient, RequestBody, RequestOptions};
use crate::auth::Session;
use crate::error::{ApiError, ErrorKind};
use crate::models::{CreateUser, LoginRequest, LoginResponse, LoginUser, RegisteredUser};

/// Sign-in against the backend. Errors come back with messages meant for
/// the sign-in screen rather than the raw backend wording.
#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client: client.without_unauthorized_handler(),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = RequestBody::json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        tracing::debug!("Signing in as {}", email);
        self.client
            .post("/auth/login", body, RequestOptions::unauthenticated())
            .await
            .map_err(friendly_error)
    }

    /// Login and shape the result into a session
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.login(email, password).await.map(Session::from_login)
    }

    pub async fn profile(&self, token: &str) -> Result<LoginUser, ApiError> {
        self.client
            .get("/auth/me", RequestOptions::new().token(token))
            .await
            .map_err(friendly_error)
    }

    pub async fn validate_token(&self, token: &str) -> bool {
        match self.profile(token).await {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!("Token rejected: {}", e);
                false
            }
        }
    }
}

/// Account creation for company users
#[derive(Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, user: &CreateUser) -> Result<RegisteredUser, ApiError> {
        self.client
            .post("/auth/register", RequestBody::json(user)?, RequestOptions::new())
            .await
    }
}

/// Replace backend wording with sign-in messages. Validation lists are
/// collapsed to one sentence; unclassified errors keep their own message.
pub fn friendly_error(err: ApiError) -> ApiError {
    match err.kind {
        ErrorKind::Validation => {
            let sentence = err.message.to_string();
            err.with_message(sentence).with_error("ValidationError")
        }
        ErrorKind::Authentication => err
            .with_message("Invalid email or password")
            .with_error("AuthenticationError"),
        ErrorKind::Forbidden => err
            .with_message("Access denied. Insufficient permissions.")
            .with_error("ForbiddenError"),
        ErrorKind::NotFound => err.with_message("Resource not found").with_error("NotFoundError"),
        ErrorKind::Server => err
            .with_message("Server error. Please try again later.")
            .with_error("ServerError"),
        ErrorKind::Network => err
            .with_message("Network error. Please check your connection.")
            .with_error("NetworkError"),
        ErrorKind::Unknown => err,
    }
}
