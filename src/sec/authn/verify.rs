use chrono::{DateTime, Utc};

use crate::audit::LoginAttempt;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::store::{AuditStore, UserStore};
use crate::user::Principal;

use super::lockout::{Guard, LockoutPolicy};
use super::{password, recovery, totp};

pub const REASON_ACCOUNT_DISABLED: &str = "Account disabled";
pub const REASON_ACCOUNT_LOCKED: &str = "Account locked";
pub const REASON_INVALID_PASSWORD: &str = "Invalid password";
pub const REASON_MFA_REQUIRED: &str = "MFA required";
pub const REASON_INVALID_MFA_TOKEN: &str = "Invalid MFA token";
pub const REASON_INVALID_BACKUP_CODE: &str = "Invalid backup code";

/// One login attempt as submitted by the session layer.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub totp_code: Option<String>,
    pub backup_code: Option<String>,
}

/// Sequences status check, password check, lockout update, second factor
/// and success finalize against one user record. Every branch past the
/// email lookup appends exactly one audit record.
pub struct Authenticator<U, A> {
    users: U,
    audit: A,
    policy: LockoutPolicy,
    totp_window: u64,
}

impl<U, A> Authenticator<U, A>
where
    U: UserStore,
    A: AuditStore,
{
    pub fn new(users: U, audit: A, config: &AuthConfig) -> Self {
        Authenticator {
            users,
            audit,
            policy: LockoutPolicy::from_config(config),
            totp_window: config.totp_window,
        }
    }

    pub fn with_defaults(users: U, audit: A) -> Self {
        Self::new(users, audit, &AuthConfig::default())
    }

    /// Verify one attempt at the given instant. `Ok(None)` is the ordinary
    /// no-match outcome (unknown email or wrong password); the typed
    /// failures force the caller to handle disabled, locked and
    /// second-factor states distinctly.
    ///
    /// Time is a parameter rather than sampled here so outcomes are
    /// deterministic under test; `authorize_now` samples the clock for
    /// callers that do not care.
    pub async fn authorize(
        &self,
        request: &LoginRequest,
        now: DateTime<Utc>,
    ) -> Result<Option<Principal>, AuthError> {
        let Some(mut user) = self.users.find_by_email(&request.email).await? else {
            tracing::debug!("no user record for submitted email");

            return Ok(None);
        };

        match self.policy.check(&user, now) {
            Some(Guard::Disabled) => {
                self.record(LoginAttempt::failure(&user.id, REASON_ACCOUNT_DISABLED, false, now))
                    .await;

                return Err(AuthError::AccountDisabled);
            }
            Some(Guard::Locked) => {
                self.record(LoginAttempt::failure(&user.id, REASON_ACCOUNT_LOCKED, false, now))
                    .await;

                return Err(AuthError::AccountLocked);
            }
            None => {}
        }

        if !password::verify(&user.password_hash, &request.password)? {
            let just_locked = self.policy.record_failure(&mut user, now);

            self.users
                .update_lockout_state(&user.id, user.status, user.failed_attempts, user.locked_until)
                .await?;

            if just_locked {
                tracing::warn!(
                    "account {} locked after {} failed attempts",
                    user.id,
                    user.failed_attempts
                );
            }

            self.record(LoginAttempt::failure(&user.id, REASON_INVALID_PASSWORD, false, now))
                .await;

            return Ok(None);
        }

        let mut mfa_used = false;

        if user.mfa_enabled {
            if let Some(secret) = user.mfa_secret.as_deref() {
                match (request.totp_code.as_deref(), request.backup_code.as_deref()) {
                    (None, None) => {
                        self.record(LoginAttempt::failure(&user.id, REASON_MFA_REQUIRED, false, now))
                            .await;

                        return Err(AuthError::MfaRequired);
                    }
                    // a submitted totp code always takes the totp path, even
                    // when a backup code rides along
                    (Some(code), _) => {
                        let key = totp::decode_base32(secret);
                        let unix = now.timestamp().max(0) as u64;

                        if !totp::verify_totp(&key, code, unix, self.totp_window) {
                            self.record(LoginAttempt::failure(
                                &user.id,
                                REASON_INVALID_MFA_TOKEN,
                                true,
                                now,
                            ))
                            .await;

                            return Err(AuthError::InvalidMfaToken);
                        }

                        mfa_used = true;
                    }
                    (None, Some(code)) => match recovery::consume(&user.mfa_backup_codes, code) {
                        Some(remaining) => {
                            user.mfa_backup_codes = remaining;

                            self.users
                                .update_backup_codes(&user.id, &user.mfa_backup_codes)
                                .await?;

                            if user.mfa_backup_codes.is_empty() {
                                tracing::warn!("account {} has exhausted its backup codes", user.id);
                            }

                            mfa_used = true;
                        }
                        None => {
                            self.record(LoginAttempt::failure(
                                &user.id,
                                REASON_INVALID_BACKUP_CODE,
                                true,
                                now,
                            ))
                            .await;

                            return Err(AuthError::InvalidBackupCode);
                        }
                    },
                }
            }
        }

        self.policy.record_success(&mut user, now);

        self.users
            .update_lockout_state(&user.id, user.status, user.failed_attempts, user.locked_until)
            .await?;
        self.users.touch_last_login(&user.id, now).await?;

        self.record(LoginAttempt::success(&user.id, mfa_used, now)).await;

        Ok(Some(Principal::from(&user)))
    }

    pub async fn authorize_now(
        &self,
        request: &LoginRequest,
    ) -> Result<Option<Principal>, AuthError> {
        self.authorize(request, Utc::now()).await
    }

    pub fn users(&self) -> &U {
        &self.users
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Audit writes fail open: the authentication outcome stands and the
    /// write failure goes to operational logging.
    async fn record(&self, attempt: LoginAttempt) {
        if let Err(err) = self.audit.append(attempt).await {
            tracing::error!("failed to append login attempt record: {err}");
        }
    }
}
