//! Salted password hashes, stored as `sha256$<salt hex>$<digest hex>`.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use uuid::Uuid;

const SCHEME: &str = "sha256";

pub fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4();
    let salt_hex = hex::encode(salt.as_bytes());
    let digest = digest(&salt_hex, password);
    format!("{SCHEME}${salt_hex}${digest}")
}

/// `false` for malformed stored hashes.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (Some(SCHEME), Some(salt_hex), Some(expected)) = (parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    let actual = digest(salt_hex, password);
    actual.len() == expected.len() && bool::from(actual.as_bytes().ct_eq(expected.as_bytes()))
}

fn digest(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
