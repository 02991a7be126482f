/// Error type surfaced by store implementations. Backends wrap whatever
/// their driver produces.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Terminal failures of a login attempt that the caller must handle
/// distinctly. Invalid credentials (unknown email, wrong password) are not
/// represented here; `authorize` returns `Ok(None)` for those.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("account is disabled")]
    AccountDisabled,

    #[error("account is locked")]
    AccountLocked,

    #[error("a second factor is required")]
    MfaRequired,

    #[error("invalid mfa token")]
    InvalidMfaToken,

    #[error("invalid backup code")]
    InvalidBackupCode,

    #[error("user store operation failed")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Argon2(#[from] argon2::Error),
}

pub type Result<T> = std::result::Result<T, AuthError>;
