use rand::{distributions::Alphanumeric, Rng};
use sha2::{Digest, Sha256};

const SALT_LEN: usize = 16;

pub fn generate_salt() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SALT_LEN)
        .map(char::from)
        .collect()
}

/// Hex-encoded SHA-256 of the password followed by its salt.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    hash_password(password, salt) == expected_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_is_deterministic_per_salt() {
        let a = hash_password("hunter22", "salt-a");
        assert_eq!(a, hash_password("hunter22", "salt-a"));
        assert_ne!(a, hash_password("hunter22", "salt-b"));
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_verify_password() {
        let salt = generate_salt();
        assert_eq!(salt.len(), SALT_LEN);
        let hash = hash_password("correct horse", &salt);
        assert!(verify_password("correct horse", &salt, &hash));
        assert!(!verify_password("wrong horse", &salt, &hash));
    }

    #[test]
    fn test_known_digest() {
        // sha256("abc")
        assert_eq!(
            hash_password("ab", "c"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
