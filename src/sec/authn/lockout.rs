use chrono::{DateTime, Duration, Utc};

use crate::config::AuthConfig;
use crate::user::{User, UserStatus};

/// Which entry guard rejected the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Disabled,
    Locked,
}

/// State machine over `{status, failed_attempts, locked_until}`. Only this
/// policy mutates those fields; `Disabled` is terminal and never entered or
/// exited here.
#[derive(Debug, Clone)]
pub struct LockoutPolicy {
    threshold: u32,
    duration: Duration,
}

impl LockoutPolicy {
    pub fn new(threshold: u32, duration: Duration) -> Self {
        LockoutPolicy { threshold, duration }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.lockout_threshold, config.lockout_duration)
    }

    /// Entry check, before any password work. A lock with an expired timer
    /// no longer blocks even though `status` keeps its stale `Locked` value;
    /// a `Locked` status with no timer at all is an administrative lock and
    /// still rejects.
    pub fn check(&self, user: &User, now: DateTime<Utc>) -> Option<Guard> {
        if user.status == UserStatus::Disabled {
            return Some(Guard::Disabled);
        }

        match user.locked_until {
            Some(until) if until > now => Some(Guard::Locked),
            Some(_) => None,
            None if user.status == UserStatus::Locked => Some(Guard::Locked),
            None => None,
        }
    }

    /// Password-mismatch path. Returns true when this attempt crossed the
    /// threshold and locked the account. The caller persists the record
    /// either way.
    pub fn record_failure(&self, user: &mut User, now: DateTime<Utc>) -> bool {
        user.failed_attempts += 1;

        if user.failed_attempts >= self.threshold {
            user.status = UserStatus::Locked;
            user.locked_until = Some(now + self.duration);

            true
        } else {
            false
        }
    }

    /// Full-success path. Counters clear and `last_login_at` is set;
    /// `status` is deliberately left alone (expired locks are already
    /// treated as open by `check`).
    pub fn record_success(&self, user: &mut User, now: DateTime<Utc>) {
        user.failed_attempts = 0;
        user.locked_until = None;
        user.last_login_at = Some(now);
    }
}
