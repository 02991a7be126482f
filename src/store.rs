use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::audit::LoginAttempt;
use crate::error::StoreError;
use crate::user::{User, UserId, UserStatus};

/// Access to user records. One `authorize` call performs one read and at
/// most two writes against the same record.
///
/// Two concurrent failed attempts against the same account race on
/// `failed_attempts` (read-modify-write). Backends must apply
/// `update_lockout_state` atomically (transaction, row lock or
/// compare-and-swap) for the lockout threshold to hold under that race.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn update_lockout_state(
        &self,
        id: &UserId,
        status: UserStatus,
        failed_attempts: u32,
        locked_until: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;

    /// Replaces the stored backup-code list. The list only ever shrinks;
    /// replenishment is account-recovery tooling, not this crate.
    async fn update_backup_codes(&self, id: &UserId, codes: &[String]) -> Result<(), StoreError>;

    async fn touch_last_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Append-only sink for login attempt records.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, attempt: LoginAttempt) -> Result<(), StoreError>;
}

pub mod mem {
    //! In-memory stores. They back the test suite and are usable as-is for
    //! single-process deployments; the mutex serializes per-store updates,
    //! which also closes the failed-attempt race for this backend.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    use crate::audit::LoginAttempt;
    use crate::error::StoreError;
    use crate::user::{User, UserId, UserStatus};

    use super::{AuditStore, UserStore};

    #[derive(Default)]
    pub struct MemoryUserStore {
        users: Mutex<HashMap<UserId, User>>,
    }

    impl MemoryUserStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn insert(&self, user: User) {
            self.users.lock().unwrap().insert(user.id.clone(), user);
        }

        pub fn get(&self, id: &str) -> Option<User> {
            self.users.lock().unwrap().get(id).cloned()
        }
    }

    #[async_trait]
    impl UserStore for MemoryUserStore {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
            let users = self.users.lock().unwrap();

            Ok(users.values().find(|user| user.email == email).cloned())
        }

        async fn update_lockout_state(
            &self,
            id: &UserId,
            status: UserStatus,
            failed_attempts: u32,
            locked_until: Option<DateTime<Utc>>,
        ) -> Result<(), StoreError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(id).ok_or("user not found")?;

            user.status = status;
            user.failed_attempts = failed_attempts;
            user.locked_until = locked_until;

            Ok(())
        }

        async fn update_backup_codes(
            &self,
            id: &UserId,
            codes: &[String],
        ) -> Result<(), StoreError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(id).ok_or("user not found")?;

            user.mfa_backup_codes = codes.to_vec();

            Ok(())
        }

        async fn touch_last_login(&self, id: &UserId, at: DateTime<Utc>) -> Result<(), StoreError> {
            let mut users = self.users.lock().unwrap();
            let user = users.get_mut(id).ok_or("user not found")?;

            user.last_login_at = Some(at);

            Ok(())
        }
    }

    #[derive(Default)]
    pub struct MemoryAuditStore {
        attempts: Mutex<Vec<LoginAttempt>>,
    }

    impl MemoryAuditStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn records(&self) -> Vec<LoginAttempt> {
            self.attempts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AuditStore for MemoryAuditStore {
        async fn append(&self, attempt: LoginAttempt) -> Result<(), StoreError> {
            self.attempts.lock().unwrap().push(attempt);

            Ok(())
        }
    }
}
