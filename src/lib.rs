pub mod audit;
pub mod config;
pub mod error;
pub mod store;
pub mod user;

pub mod sec;

pub use audit::LoginAttempt;
pub use config::AuthConfig;
pub use error::{AuthError, StoreError};
pub use sec::authn::{Authenticator, LoginRequest};
pub use user::{Principal, User, UserStatus};
