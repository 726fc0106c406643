use sha2::{Digest, Sha256};

/// Number of hex characters kept from the SHA-256 digest.
pub const SHORT_HASH_LEN: usize = 6;

/// Derive the public short hash for a URL.
///
/// SHA-256 over the UTF-8 bytes, rendered as lowercase hex, truncated to the
/// first [`SHORT_HASH_LEN`] characters. Deterministic: the same URL always
/// maps to the same short hash. 24 bits of digest means collisions between
/// different URLs are possible and are not detected here.
pub fn short_hash(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();

    let mut hash = hex::encode(digest);
    hash.truncate(SHORT_HASH_LEN);
    hash
}

/// Whether `s` has the shape of a short hash: exactly six lowercase hex
/// characters. Resolution does not pre-validate ids (malformed ones just
/// miss), but the SQL view-flush path refuses anything else.
pub fn is_short_hash(s: &str) -> bool {
    s.len() == SHORT_HASH_LEN && s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_deterministic() {
        let a = short_hash("https://example.com");
        let b = short_hash("https://example.com");
        assert_eq!(a, b);
    }

    #[test]
    fn test_short_hash_shape() {
        for url in [
            "https://example.com",
            "http://a",
            "not a url at all",
            "ünïcode-ürl",
            "x",
        ] {
            let hash = short_hash(url);
            assert_eq!(hash.len(), SHORT_HASH_LEN);
            assert!(is_short_hash(&hash), "bad hash {hash:?} for {url:?}");
        }
    }

    #[test]
    fn test_short_hash_known_value() {
        // First 6 hex chars of sha256("https://example.com")
        assert_eq!(short_hash("https://example.com"), "100680");
    }

    #[test]
    fn test_short_hash_distinct_inputs() {
        assert_ne!(short_hash("https://example.com"), short_hash("https://example.org"));
    }

    #[test]
    fn test_is_short_hash_rejects() {
        assert!(is_short_hash("abc123"));
        assert!(!is_short_hash("ABC123"));
        assert!(!is_short_hash("abc12"));
        assert!(!is_short_hash("abc1234"));
        assert!(!is_short_hash("zzzzzz"));
        assert!(!is_short_hash(""));
        assert!(!is_short_hash("favicon.ico"));
    }
}
