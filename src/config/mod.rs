use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub auth: AuthConfig,
    pub list: ListConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub sign_in_path: String,
    pub session_max_age_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    pub default_page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub log_request_bodies: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("CONSOLE_API_URL") {
            let trimmed = v.trim().trim_end_matches('/');
            if !trimmed.is_empty() {
                self.api.base_url = trimmed.to_string();
            }
        }
        if let Ok(v) = env::var("CONSOLE_USER_AGENT") {
            self.api.user_agent = v;
        }

        if let Ok(v) = env::var("CONSOLE_SIGN_IN_PATH") {
            self.auth.sign_in_path = v;
        }
        if let Ok(v) = env::var("CONSOLE_SESSION_MAX_AGE_HOURS") {
            self.auth.session_max_age_hours = v.parse().unwrap_or(self.auth.session_max_age_hours);
        }

        if let Ok(v) = env::var("CONSOLE_DEFAULT_PAGE_SIZE") {
            self.list.default_page_size = v
                .parse()
                .ok()
                .filter(|size| *size > 0)
                .unwrap_or(self.list.default_page_size);
        }

        if let Ok(v) = env::var("CONSOLE_LOG_REQUEST_BODIES") {
            self.logging.log_request_bodies = v.parse().unwrap_or(self.logging.log_request_bodies);
        }

        self
    }

    fn base(environment: Environment, log_request_bodies: bool) -> Self {
        Self {
            environment,
            api: ApiConfig {
                base_url: DEFAULT_API_URL.to_string(),
                user_agent: format!("saas-console/{}", env!("CARGO_PKG_VERSION")),
            },
            auth: AuthConfig {
                sign_in_path: "/sign-in".to_string(),
                session_max_age_hours: 24 * 7, // matches backend JWT expiry
            },
            list: ListConfig {
                default_page_size: 10,
            },
            logging: LoggingConfig { log_request_bodies },
        }
    }

    fn development() -> Self {
        Self::base(Environment::Development, true)
    }

    fn staging() -> Self {
        Self::base(Environment::Staging, false)
    }

    fn production() -> Self {
        Self::base(Environment::Production, false)
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.auth.sign_in_path, "/sign-in");
        assert_eq!(config.list.default_page_size, 10);
        assert!(config.logging.log_request_bodies);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.logging.log_request_bodies);
        assert_eq!(config.auth.session_max_age_hours, 168);
    }
}
