use sha2::{Digest, Sha256};

/// Deterministic article identity: hex SHA-256 of the trimmed url.
pub fn compute_article_id(url: &str) -> String {
    hex::encode(Sha256::digest(url.trim().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            compute_article_id("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_trimming_is_ignored() {
        let a = compute_article_id("https://news.example.com/story/1");
        let b = compute_article_id("  https://news.example.com/story/1\n");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_distinct_urls_distinct_ids() {
        let ids: std::collections::HashSet<String> = (0..500)
            .map(|i| compute_article_id(&format!("https://news.example.com/story/{i}")))
            .collect();
        assert_eq!(ids.len(), 500);
    }
}
