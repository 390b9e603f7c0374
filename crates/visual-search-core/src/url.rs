//! Probe URL normalization.
//!
//! Image hosts often accept transformation parameters in the URL (format,
//! quality, size). Rewriting a URL before it is sent is the job of a
//! [`UrlNormalizer`]. The session treats it as opaque and calls it only for
//! URL probes.

/// Rewrites a probe URL before it is sent to the search service.
pub trait UrlNormalizer: Send + Sync {
    fn normalize(&self, raw: &str) -> String;
}

/// Default normalizer: strips surrounding whitespace and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrimNormalizer;

impl UrlNormalizer for TrimNormalizer {
    fn normalize(&self, raw: &str) -> String {
        raw.trim().to_string()
    }
}

impl<F> UrlNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize(&self, raw: &str) -> String {
        self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_normalizer() {
        assert_eq!(
            TrimNormalizer.normalize("  https://cdn.example.com/a.jpg \n"),
            "https://cdn.example.com/a.jpg"
        );
    }

    #[test]
    fn test_closure_normalizer() {
        let normalizer = |raw: &str| format!("{}?q=auto", raw.trim());
        assert_eq!(normalizer.normalize(" https://x/a.png"), "https://x/a.png?q=auto");
    }
}
