//! Salted PBKDF2-SHA256 password hashing.
//!
//! Stored format: `pbkdf2$<iterations>$<salt hex>$<hash hex>`. Verification
//! re-derives with the stored salt and iteration count, so the count can be
//! raised later without invalidating existing users.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

const PBKDF2_ITERATIONS: u32 = 600_000;
const HASH_LENGTH: usize = 32;
const SALT_LENGTH: usize = 16;

/// Hashes a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);

    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, PBKDF2_ITERATIONS, &mut hash);

    format!(
        "pbkdf2${}${}${}",
        PBKDF2_ITERATIONS,
        hex_encode(&salt),
        hex_encode(&hash)
    )
}

/// Verifies a password against a stored hash string.
///
/// Malformed stored values verify as false rather than erroring; a row that
/// cannot be parsed should never authenticate.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    let (Some("pbkdf2"), Some(iterations), Some(salt_hex), Some(hash_hex), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return false;
    };

    let Ok(iterations) = iterations.parse::<u32>() else {
        return false;
    };
    let (Some(salt), Some(expected)) = (hex_decode(salt_hex), hex_decode(hash_hex)) else {
        return false;
    };

    let mut derived = vec![0u8; expected.len()];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), &salt, iterations, &mut derived);

    // Constant-time comparison.
    derived.len() == expected.len()
        && derived
            .iter()
            .zip(expected.iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_password_verifies() {
        let stored = hash_password("hunter2");
        assert!(verify_password("hunter2", &stored));
    }

    #[test]
    fn wrong_password_fails() {
        let stored = hash_password("hunter2");
        assert!(!verify_password("hunter3", &stored));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        assert_ne!(hash_password("pw"), hash_password("pw"));
    }

    #[test]
    fn malformed_stored_value_never_authenticates() {
        assert!(!verify_password("pw", "plaintext-pw"));
        assert!(!verify_password("pw", "pbkdf2$notanumber$00$00"));
        assert!(!verify_password("pw", "pbkdf2$1000$zz$00"));
    }

    #[test]
    fn hex_round_trips() {
        let bytes = [0x00, 0xff, 0x10, 0xab];
        assert_eq!(hex_decode(&hex_encode(&bytes)).unwrap(), bytes);
    }
}
