use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::errors::ModelError;

pub fn hash_password(password: &str) -> Result<String, ModelError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ModelError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ModelError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| ModelError::InvalidHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_round_trip() {
        let hash = hash_password("alice1234").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("alice1234", &hash).unwrap());
        assert!(!verify_password("alice12345", &hash).unwrap());
    }

    #[test]
    fn test_salted_hashes_differ() {
        let a = hash_password("bob1234").unwrap();
        let b = hash_password("bob1234").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_rejected() {
        let result = verify_password("bob1234", "not-a-phc-string");
        assert!(matches!(result, Err(ModelError::InvalidHash(_))));
    }
}
