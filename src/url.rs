//! REST URL construction from path segments

use std::fmt::Write;

use compact_str::CompactString;
use reqwest::Url;

use crate::error::{ClientError, Result};

/// A single path segment of a REST URL
///
/// `Option<T>` segments are skipped when `None`, which keeps call sites free
/// of conditional URL assembly.
pub trait UrlSegment {
    /// Append `/<segment>` to `out`; skipped segments append nothing
    fn write_to(&self, out: &mut String);
}

impl UrlSegment for str {
    fn write_to(&self, out: &mut String) {
        out.push('/');
        out.push_str(self);
    }
}

impl UrlSegment for String {
    fn write_to(&self, out: &mut String) {
        self.as_str().write_to(out);
    }
}

impl UrlSegment for CompactString {
    fn write_to(&self, out: &mut String) {
        self.as_str().write_to(out);
    }
}

impl UrlSegment for u64 {
    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "/{self}");
    }
}

impl UrlSegment for i64 {
    fn write_to(&self, out: &mut String) {
        let _ = write!(out, "/{self}");
    }
}

impl<T: UrlSegment> UrlSegment for Option<T> {
    fn write_to(&self, out: &mut String) {
        if let Some(segment) = self {
            segment.write_to(out);
        }
    }
}

impl<T: UrlSegment + ?Sized> UrlSegment for &T {
    fn write_to(&self, out: &mut String) {
        (**self).write_to(out);
    }
}

/// Join `base_url` with the non-skipped segments using single `/` separators
/// and parse the result
pub fn build_url(base_url: &str, segments: &[&dyn UrlSegment]) -> Result<Url> {
    let mut url = String::from(base_url);
    for segment in segments {
        segment.write_to(&mut url);
    }

    Url::parse(&url).map_err(|_| ClientError::invalid_url(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://gitlab.example.com/api/v4";

    #[test]
    fn test_join_segments() {
        let url = build_url(BASE, &[&"projects", &123u64, &"pipelines"]).unwrap();
        assert_eq!(url.as_str(), "https://gitlab.example.com/api/v4/projects/123/pipelines");
    }

    #[test]
    fn test_none_segments_are_skipped() {
        let url = build_url(BASE, &[&"projects", &None::<&str>, &Some("123")]).unwrap();
        assert_eq!(url.as_str(), "https://gitlab.example.com/api/v4/projects/123");
    }

    #[test]
    fn test_all_none_segments_yield_base() {
        let url = build_url(BASE, &[&None::<&str>, &None::<u64>]).unwrap();
        assert_eq!(url.as_str(), BASE);
    }

    #[test]
    fn test_never_produces_double_slash() {
        let url = build_url(BASE, &[&"projects", &"group%2Fproject"]).unwrap();
        assert!(!url.path().contains("//"));
    }

    #[test]
    fn test_invalid_base_fails() {
        let result = build_url("not-a-url", &[&"projects"]);
        assert!(matches!(result, Err(ClientError::InvalidUrl { .. })));
    }

    #[test]
    fn test_owned_segment_types() {
        let owned = String::from("projects");
        let compact = CompactString::from("123");
        let url = build_url(BASE, &[&owned, &compact]).unwrap();
        assert_eq!(url.as_str(), "https://gitlab.example.com/api/v4/projects/123");
    }
}
