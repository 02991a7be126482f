pub mod lockout;
pub mod password;
pub mod recovery;
pub mod totp;
pub mod verify;

pub use verify::{Authenticator, LoginRequest};
