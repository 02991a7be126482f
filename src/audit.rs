use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::UserId;

/// One immutable record per login attempt that reached a terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub user_id: UserId,
    pub success: bool,
    /// required when `success` is false
    pub reason: Option<String>,
    pub mfa_used: bool,
    pub timestamp: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn success(user_id: &UserId, mfa_used: bool, at: DateTime<Utc>) -> Self {
        LoginAttempt {
            user_id: user_id.clone(),
            success: true,
            reason: None,
            mfa_used,
            timestamp: at,
        }
    }

    pub fn failure<R>(user_id: &UserId, reason: R, mfa_used: bool, at: DateTime<Utc>) -> Self
    where
        R: Into<String>,
    {
        LoginAttempt {
            user_id: user_id.clone(),
            success: false,
            reason: Some(reason.into()),
            mfa_used,
            timestamp: at,
        }
    }
}
