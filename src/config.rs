use chrono::Duration;

pub const DEFAULT_LOCKOUT_THRESHOLD: u32 = 5;
pub const DEFAULT_LOCKOUT_MINUTES: i64 = 30;
pub const DEFAULT_TOTP_WINDOW: u64 = 1;

/// Policy knobs for the credential verifier. The TOTP step is fixed at 30
/// seconds and is not part of the configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// consecutive failed password attempts before the account locks
    pub lockout_threshold: u32,
    /// how long a lockout lasts once triggered
    pub lockout_duration: Duration,
    /// accepted TOTP steps on either side of the current one
    pub totp_window: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        AuthConfig {
            lockout_threshold: DEFAULT_LOCKOUT_THRESHOLD,
            lockout_duration: Duration::minutes(DEFAULT_LOCKOUT_MINUTES),
            totp_window: DEFAULT_TOTP_WINDOW,
        }
    }
}

impl AuthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lockout_threshold(mut self, threshold: u32) -> Self {
        self.lockout_threshold = threshold;
        self
    }

    pub fn lockout_duration(mut self, duration: Duration) -> Self {
        self.lockout_duration = duration;
        self
    }

    pub fn totp_window(mut self, window: u64) -> Self {
        self.totp_window = window;
        self
    }
}
