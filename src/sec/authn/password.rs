use argon2::Variant;
use rand::RngCore;

pub const SALT_LEN: usize = 32;

pub type Salt = [u8; SALT_LEN];

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error(transparent)]
    Rand(#[from] rand::Error),

    #[error(transparent)]
    Argon2(#[from] argon2::Error),
}

pub fn gen_salt() -> Result<Salt, rand::Error> {
    let mut salt = [0u8; SALT_LEN];

    rand::thread_rng().try_fill_bytes(&mut salt)?;

    Ok(salt)
}

/// Hash a password for storage. Provisioning-side helper; the verifier only
/// ever reads hashes minted elsewhere.
pub fn gen_hash(password: &str) -> Result<String, HashError> {
    let salt = gen_salt()?;

    let mut config = argon2::Config::default();
    config.mem_cost = 19456;
    config.variant = Variant::Argon2id;

    Ok(argon2::hash_encoded(password.as_bytes(), &salt, &config)?)
}

/// Constant-time comparison of a submitted password against the stored
/// encoded hash.
pub fn verify<C>(hash: &str, check: C) -> Result<bool, argon2::Error>
where
    C: AsRef<[u8]>,
{
    argon2::verify_encoded(hash, check.as_ref())
}
