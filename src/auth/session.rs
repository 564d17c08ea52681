use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use super::roles::{self, SUPERADMIN_MASTER};
use crate::models::user::LoginResponse;

/// Signed-in user as provided by the identity layer. Requests only consume
/// `access_token`; `authority` and `is_super_admin` drive gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub authority: Vec<String>,
    pub access_token: String,
    pub is_super_admin: bool,
    pub company: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

impl Session {
    /// Shape a login response into a session: the single backend role becomes
    /// the authority list.
    pub fn from_login(response: LoginResponse) -> Self {
        let user = response.user;
        Self {
            user_name: format!("{} {}", user.first_name, user.last_name),
            id: user.id,
            email: user.email,
            authority: vec![user.role],
            access_token: response.access_token,
            is_super_admin: user.is_super_admin,
            company: user.company,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }

    pub fn has_authority(&self, authority: &str) -> bool {
        self.authority.iter().any(|a| a == authority)
    }

    /// Whether this session may open a console route. Unknown routes are
    /// denied.
    pub fn can_access(&self, route: &str) -> bool {
        match roles::route_authority(route) {
            Some([]) => true,
            Some(allowed) => allowed.iter().any(|a| self.has_authority(a)),
            None => false,
        }
    }

    pub fn is_superadmin_master(&self) -> bool {
        self.is_super_admin && self.has_authority(SUPERADMIN_MASTER)
    }

    /// `exp` claim of the access token. The signature is not checked; the
    /// backend stays the authority on token validity.
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        let data = decode::<ExpiryClaims>(&self.access_token, &DecodingKey::from_secret(&[]), &validation).ok()?;
        data.claims
            .exp
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
    }

    pub fn is_expired(&self) -> bool {
        self.token_expiry()
            .map(|exp| exp <= Utc::now())
            .unwrap_or(false)
    }
}
