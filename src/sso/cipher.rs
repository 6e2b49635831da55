//! Field obfuscation and signing used by UseResponse SSO.
//!
//! UseResponse defines this scheme; it is not real cryptography and must be
//! reproduced byte-for-byte for the service to accept a login URL.

use md5::Md5;
use sha1::{Digest, Sha1};

use super::radix::digits_lsb_first;

/// Returns the lowercase hex SHA-1 digest of `data`.
fn sha1_hex(data: &[u8]) -> String {
    hex::encode(Sha1::digest(data))
}

/// Obfuscates `input` with a keystream derived from `secret`.
///
/// Each input byte is added to the matching character of the secret's hex
/// SHA-1 digest (cycling every 40 characters), rendered in base 36 and
/// reversed. The output only contains `0-9a-z`.
pub fn encrypt(secret: &str, input: &str) -> String {
    let key = sha1_hex(secret.as_bytes());
    let key = key.as_bytes();

    let mut out = String::with_capacity(input.len() * 2);
    for (i, byte) in input.bytes().enumerate() {
        let sum = u64::from(byte) + u64::from(key[i % key.len()]);
        out.extend(digits_lsb_first(sum, 36).into_iter().map(char::from));
    }
    out
}

/// Computes the signature that binds the identity fields to `secret`.
pub fn generate_hash(
    secret: &str,
    full_name: &str,
    user_id: &str,
    email: &str,
    source: &str,
) -> String {
    let mut reversed_secret = secret.as_bytes().to_vec();
    reversed_secret.reverse();
    let key = sha1_hex(hex::encode(Md5::digest(&reversed_secret)).as_bytes());

    let mut hashable = [full_name, user_id, email, source]
        .join(key.as_str())
        .into_bytes();
    hashable.reverse();

    sha1_hex(&hashable)
}
