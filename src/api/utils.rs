//! Pure helpers for the HTTP layer

use axum::http::HeaderValue;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Value of the identifying header sent with every response
pub const POWERED_BY: &str = concat!("stremio-addon-rs/", env!("CARGO_PKG_VERSION"));

/// Strip the mandatory `.json` suffix from the last path segment
pub fn strip_json_suffix(segment: &str) -> Option<&str> {
    segment.strip_suffix(".json").filter(|rest| !rest.is_empty())
}

/// Last `N` segments of a path exactly as the client sent them (not
/// percent-decoded). `None` when the path is shorter or one of them is empty.
pub fn raw_trailing_segments<const N: usize>(path: &str) -> Option<[&str; N]> {
    let mut segments: Vec<&str> = path
        .rsplit('/')
        .take(N)
        .filter(|segment| !segment.is_empty())
        .collect();
    segments.reverse();
    segments.try_into().ok()
}

/// Percent-decode one path segment. Invalid UTF-8 becomes U+FFFD.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    percent_decode_str(segment).decode_utf8_lossy()
}

/// `Cache-Control` header for the configured max-age
pub fn cache_control(max_age: u64) -> HeaderValue {
    HeaderValue::from_str(&format!("max-age={max_age}, public"))
        .unwrap_or_else(|_| HeaderValue::from_static("max-age=0, public"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_suffix() {
        assert_eq!(strip_json_suffix("tt123.json"), Some("tt123"));
        assert_eq!(strip_json_suffix("genre=action.json"), Some("genre=action"));
        assert_eq!(strip_json_suffix("v1.2.json"), Some("v1.2"));
        assert_eq!(strip_json_suffix("tt123"), None);
        assert_eq!(strip_json_suffix(".json"), None);
    }

    #[test]
    fn test_raw_trailing_segments_keep_encoding() {
        assert_eq!(
            raw_trailing_segments("/catalog/movie/top/search=rock%26roll.json"),
            Some(["catalog", "movie", "top", "search=rock%26roll.json"])
        );
        assert_eq!(
            raw_trailing_segments("/addon/stream/movie/tt1.json"),
            Some(["stream", "movie", "tt1.json"])
        );
        assert_eq!(raw_trailing_segments::<3>("/catalog/movie/"), None);
        assert_eq!(raw_trailing_segments::<3>("/movie/tt1.json"), None);
    }

    #[test]
    fn test_decode_segment_is_lossy() {
        assert_eq!(decode_segment("tt123%3A1%3A2"), "tt123:1:2");
        assert_eq!(decode_segment("a+b"), "a+b");
        assert_eq!(decode_segment("%FF"), "\u{FFFD}");
    }

    #[test]
    fn test_cache_control() {
        assert_eq!(cache_control(0), "max-age=0, public");
        assert_eq!(cache_control(3600), "max-age=3600, public");
    }
}
