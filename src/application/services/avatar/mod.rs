use sha2::{Digest, Sha256};

/// Gravatar URL for a commenter's email. Addresses are hashed after
/// trimming and lowercasing, per the Gravatar canonicalization rules.
pub fn avatar_url(email: &str) -> String {
    let normalized = email.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    let out = hasher.finalize();
    format!("https://www.gravatar.com/avatar/{:x}?s=100&d=retro&r=g", out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(avatar_url("  Reader@Example.COM "), avatar_url("reader@example.com"));
    }

    #[test]
    fn embeds_hex_digest_and_params() {
        let url = avatar_url("reader@example.com");
        assert!(url.starts_with("https://www.gravatar.com/avatar/"));
        assert!(url.ends_with("?s=100&d=retro&r=g"));
        let digest = url
            .trim_start_matches("https://www.gravatar.com/avatar/")
            .split('?')
            .next()
            .unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
