//! Content-derived identifiers.

use crate::util::to_base36;

/// Length of the hash part of a generated identifier.
const HASH_LEN: usize = 7;

/// Short base-36 digest of `input`, stable across runs and platforms.
pub fn short_hash(input: &str) -> String {
    let digest = sha1_smol::Sha1::from(input).digest().bytes();
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest[..8]);
    let mut encoded = to_base36(u64::from_be_bytes(word));
    encoded.truncate(HASH_LEN);
    encoded
}

/// `prefix` followed by the short hash of `input`.
pub fn identifier(prefix: &str, input: &str) -> String {
    format!("{prefix}{}", short_hash(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_and_distinct() {
        assert_eq!(short_hash("margin-left:5px"), short_hash("margin-left:5px"));
        assert_ne!(short_hash("margin-left:5px"), short_hash("margin-right:5px"));
        assert!(identifier("x", "a").starts_with('x'));
        assert!(short_hash("a").len() <= HASH_LEN);
        assert!(short_hash("a").chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
