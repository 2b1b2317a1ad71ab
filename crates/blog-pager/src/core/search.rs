//! Search-page state kept in sync with the URL query string.

use serde::{Deserialize, Serialize};

use super::{
    limits::{effective_limit, page_count},
    types::{DescriptorInput, Intent, PagerConfig, PagingDescriptor, DEFAULT_LIMIT},
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchState {
    #[serde(default)]
    pub query: Option<String>,
    pub page: u32,
    pub limit: u32,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            query: None,
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl SearchState {
    /// Parse `q`, `page` and `limit` out of a query string such as
    /// `?q=rust+tips&page=2&limit=20`. Unknown keys are ignored and bad
    /// numbers fall back to the defaults.
    pub fn from_query_string(raw: &str) -> Self {
        let mut state = Self::default();
        let raw = raw.strip_prefix('?').unwrap_or(raw);

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(value);
            match decode_component(key).as_str() {
                "q" => state.query = Some(value).filter(|v| !v.is_empty()),
                "page" => state.page = parse_positive(&value).unwrap_or(1),
                "limit" => state.limit = parse_positive(&value).unwrap_or(DEFAULT_LIMIT),
                _ => {}
            }
        }
        state
    }

    pub fn to_query_string(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if let Some(q) = &self.query {
            parts.push(format!("q={}", encode_component(q)));
        }
        parts.push(format!("page={}", self.page));
        parts.push(format!("limit={}", self.limit));
        parts.join("&")
    }

    /// New search text always starts again from the first page.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.trim().is_empty());
        self.page = 1;
        self
    }

    /// Pages and limits start at 1.
    pub fn validate(&self) -> AppResult<()> {
        if self.page == 0 {
            return Err(AppError::InvalidRequest("page must be at least 1".into()));
        }
        if self.limit == 0 {
            return Err(AppError::InvalidRequest("limit must be at least 1".into()));
        }
        Ok(())
    }

    /// Apply a pager intent. Zero pages or limits are rejected and leave
    /// the state untouched.
    pub fn apply(&mut self, intent: Intent) -> AppResult<()> {
        match intent {
            Intent::PageChange(0) | Intent::LimitChange(0) => Err(AppError::InvalidRequest(
                format!("intent value must be at least 1: {intent:?}"),
            )),
            Intent::PageChange(page) => {
                self.page = page;
                Ok(())
            }
            Intent::LimitChange(limit) => {
                self.limit = limit;
                self.page = 1;
                Ok(())
            }
        }
    }

    /// Paging descriptor for a result set of `total_items`. A limit that
    /// is not offered falls back to the configured default.
    pub fn descriptor(&self, total_items: u64, cfg: &PagerConfig) -> PagingDescriptor {
        let limit = effective_limit(Some(self.limit), &cfg.limit_options, cfg.default_limit);
        DescriptorInput {
            current_page: Some(self.page),
            page_count: Some(page_count(total_items, limit)),
            current_limit: Some(limit),
            ..DescriptorInput::default()
        }
        .resolve(cfg)
    }

    /// Zero-based offset of the first item on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    s.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    (Some(h), Some(l)) => {
                        out.push((h << 4) | l);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

fn encode_component(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_fields() {
        let s = SearchState::from_query_string("?q=rust+tips&page=3&limit=20");
        assert_eq!(s.query.as_deref(), Some("rust tips"));
        assert_eq!(s.page, 3);
        assert_eq!(s.limit, 20);
    }

    #[test]
    fn bad_numbers_and_unknown_keys_fall_back() {
        let s = SearchState::from_query_string("page=zero&limit=0&sort=desc&q=");
        assert_eq!(s, SearchState::default());
    }

    #[test]
    fn percent_decoding_keeps_reserved_characters() {
        let s = SearchState::from_query_string("q=a%26b%3Dc%20d&page=2");
        assert_eq!(s.query.as_deref(), Some("a&b=c d"));
        assert_eq!(s.page, 2);
    }

    #[test]
    fn malformed_escape_is_kept_literally() {
        let s = SearchState::from_query_string("q=100%&page=1");
        assert_eq!(s.query.as_deref(), Some("100%"));
    }

    #[test]
    fn query_string_survives_encoding() {
        let s = SearchState {
            query: Some("cats & dogs/ñ".into()),
            page: 4,
            limit: 50,
        };
        let qs = s.to_query_string();
        assert!(qs.starts_with("q=cats+%26+dogs%2F%C3%B1&"));
        assert_eq!(SearchState::from_query_string(&qs), s);
    }

    #[test]
    fn omits_empty_query() {
        assert_eq!(SearchState::default().to_query_string(), "page=1&limit=10");
    }

    #[test]
    fn limit_change_resets_page() {
        let mut s = SearchState {
            query: None,
            page: 7,
            limit: 10,
        };
        s.apply(Intent::PageChange(8)).unwrap();
        assert_eq!(s.page, 8);
        s.apply(Intent::LimitChange(50)).unwrap();
        assert_eq!((s.page, s.limit), (1, 50));
    }

    #[test]
    fn zero_intents_are_rejected_without_change() {
        let mut s = SearchState {
            query: None,
            page: 3,
            limit: 20,
        };
        let before = s.clone();
        assert_eq!(s.apply(Intent::LimitChange(0)).unwrap_err().code(), "INVALID_REQUEST");
        assert_eq!(s.apply(Intent::PageChange(0)).unwrap_err().code(), "INVALID_REQUEST");
        assert_eq!(s, before);
    }

    #[test]
    fn validate_requires_positive_page_and_limit() {
        assert!(SearchState::default().validate().is_ok());
        let zero_page = SearchState {
            page: 0,
            ..SearchState::default()
        };
        assert!(zero_page.validate().is_err());
        let zero_limit = SearchState {
            limit: 0,
            ..SearchState::default()
        };
        assert_eq!(zero_limit.validate().unwrap_err().code(), "INVALID_REQUEST");
    }

    #[test]
    fn new_query_resets_page() {
        let s = SearchState {
            query: Some("old".into()),
            page: 5,
            limit: 10,
        }
        .with_query(Some("new".into()));
        assert_eq!(s.page, 1);
        assert_eq!(s.query.as_deref(), Some("new"));
        assert_eq!(SearchState::default().with_query(Some("  ".into())).query, None);
    }

    #[test]
    fn descriptor_from_result_count() {
        let s = SearchState {
            query: None,
            page: 2,
            limit: 20,
        };
        let d = s.descriptor(95, &PagerConfig::default());
        assert_eq!(d.page_count, 5);
        assert_eq!(d.current_page, 2);
        assert_eq!(d.current_limit, 20);
        assert_eq!(d.page_length, 5);
        assert_eq!(s.offset(), 20);
    }

    #[test]
    fn descriptor_ignores_unoffered_limit() {
        let s = SearchState::from_query_string("limit=7&page=2");
        let d = s.descriptor(35, &PagerConfig::default());
        assert_eq!(d.current_limit, 10);
        assert_eq!(d.page_count, 4);
    }
}
