use hmac::{Hmac, Mac};
use rand::RngCore;
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Time step in seconds. Fixed; authenticator apps assume it.
pub const STEP: u64 = 30;
pub const DIGITS: usize = 6;
pub const SECRET_LEN: usize = 25;

/// Generate a fresh shared secret, base32-encoded for storage and for the
/// provisioning URI.
pub fn create_secret() -> Result<String, rand::Error> {
    let mut bytes = [0u8; SECRET_LEN];
    rand::thread_rng().try_fill_bytes(&mut bytes)?;

    Ok(data_encoding::BASE32_NOPAD.encode(&bytes))
}

/// otpauth URI for authenticator enrollment.
pub fn provisioning_uri(secret: &str, issuer: &str, account: &str) -> String {
    format!(
        "otpauth://totp/{issuer}:{account}?secret={secret}&issuer={issuer}&digits={DIGITS}&period={STEP}"
    )
}

/// Decode an RFC 4648 base32 secret. Case-insensitive; anything outside the
/// alphabet (padding included) is skipped rather than rejected, and trailing
/// bits that never fill a byte are dropped. An empty result is valid input
/// to `hotp`.
pub fn decode_base32(secret: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(secret.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for ch in secret.chars() {
        let value = match ch {
            'A'..='Z' => ch as u32 - 'A' as u32,
            'a'..='z' => ch as u32 - 'a' as u32,
            '2'..='7' => ch as u32 - '2' as u32 + 26,
            _ => continue,
        };

        buffer = (buffer << 5) | value;
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
        }
    }

    output
}

/// RFC 4226 HOTP: HMAC-SHA1 over the big-endian counter, dynamic truncation,
/// six digits zero-padded.
pub fn hotp(secret: &[u8], counter: u64) -> String {
    // hmac-sha1 accepts keys of any length
    let mut mac = HmacSha1::new_from_slice(secret).expect("hmac key of any length");
    mac.update(&counter.to_be_bytes());

    let digest = mac.finalize().into_bytes();

    let offset = (digest[19] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]) & 0x7fff_ffff;

    format!("{:06}", binary % 1_000_000)
}

/// RFC 6238 TOTP with the fixed 30 second step. Time is an explicit
/// parameter so verification stays deterministic under test.
pub fn totp(secret: &[u8], unix: u64) -> String {
    hotp(secret, unix / STEP)
}

/// Accepts a code that matches any step within `window` steps of the one
/// derived from `unix`. Codes are compared as zero-padded strings, never as
/// integers. Used counters are not tracked, so a code can be replayed within
/// its window; the window is the only tolerated replay surface.
pub fn verify_totp(secret: &[u8], code: &str, unix: u64, window: u64) -> bool {
    let counter = unix / STEP;
    let window = window as i64;

    for k in -window..=window {
        let Some(step) = counter.checked_add_signed(k) else {
            continue;
        };

        if hotp(secret, step) == code {
            return true;
        }
    }

    false
}
