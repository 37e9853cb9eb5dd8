//! Shared-secret comparison for the admin login.
//!
//! Both sides are run through HMAC-SHA256 under a server key and compared
//! with [`Mac::verify_slice`], which runs in constant time. The result is the
//! same as plain string equality.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac_for(key: &[u8], value: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(value.as_bytes());
    mac
}

/// Whether `candidate` equals `expected`.
///
/// An empty `expected` never matches, so an unset password cannot be
/// satisfied by submitting an empty form.
pub fn secrets_match(candidate: &str, expected: &str, key: &[u8]) -> bool {
    if expected.is_empty() {
        return false;
    }
    let expected_tag = mac_for(key, expected).finalize().into_bytes();
    mac_for(key, candidate).verify_slice(&expected_tag).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &[u8] = b"test-key";

    #[test]
    fn equal_secrets_match() {
        assert!(secrets_match("hunter2", "hunter2", KEY));
    }

    #[test]
    fn different_secrets_do_not_match() {
        assert!(!secrets_match("hunter3", "hunter2", KEY));
        assert!(!secrets_match("hunter2 ", "hunter2", KEY));
    }

    #[test]
    fn empty_expected_never_matches() {
        assert!(!secrets_match("", "", KEY));
    }

    #[test]
    fn result_does_not_depend_on_key() {
        assert!(secrets_match("abc", "abc", b"one"));
        assert!(secrets_match("abc", "abc", b"two"));
    }
}
