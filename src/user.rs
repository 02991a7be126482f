use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Active,
    Locked,
    /// set and cleared by administrative tooling only, never by this crate
    Disabled,
}

/// Account record as read from the user store. The verifier mutates only
/// `status`, `failed_attempts`, `locked_until`, `mfa_backup_codes` and
/// `last_login_at`; everything else is owned by provisioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub status: UserStatus,
    pub failed_attempts: u32,
    pub locked_until: Option<DateTime<Utc>>,
    pub mfa_enabled: bool,
    pub mfa_secret: Option<String>,
    pub mfa_backup_codes: Vec<String>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub role: String,
    pub org_id: String,
}

/// What a fully authenticated attempt hands back to the session layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub id: UserId,
    pub email: String,
    pub role: String,
    pub org_id: String,
    pub mfa_enabled: bool,
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Principal {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            org_id: user.org_id.clone(),
            mfa_enabled: user.mfa_enabled,
        }
    }
}
