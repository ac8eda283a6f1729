//! Correlation id resolution.
//!
//! Precedence, first non-empty match wins:
//! 1. `x-correlation-id` header
//! 2. `x-request-id` header
//! 3. the platform's per-invocation request id

use crate::http::request::Headers;

pub const CORRELATION_ID_HEADER: &str = "x-correlation-id";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn resolve_correlation_id(headers: &Headers, fallback: Option<&str>) -> Option<String> {
    let non_empty = |id: &&str| !id.is_empty();
    headers
        .get(CORRELATION_ID_HEADER)
        .filter(non_empty)
        .or_else(|| headers.get(REQUEST_ID_HEADER).filter(non_empty))
        .or_else(|| fallback.filter(non_empty))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(pairs: &[(&str, &str)]) -> Headers {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_correlation_header_wins_in_any_case() {
        for name in ["x-correlation-id", "X-Correlation-Id", "X-CORRELATION-ID"] {
            let h = headers(&[(name, "corr"), ("x-request-id", "req")]);
            assert_eq!(resolve_correlation_id(&h, Some("platform")).as_deref(), Some("corr"));
        }
    }

    #[test]
    fn test_request_id_then_fallback() {
        let h = headers(&[("X-Request-Id", "req")]);
        assert_eq!(resolve_correlation_id(&h, Some("platform")).as_deref(), Some("req"));

        let h = headers(&[]);
        assert_eq!(resolve_correlation_id(&h, Some("platform")).as_deref(), Some("platform"));
        assert_eq!(resolve_correlation_id(&h, None), None);
    }

    #[test]
    fn test_empty_header_values_are_skipped() {
        let h = headers(&[("x-correlation-id", ""), ("x-request-id", "req")]);
        assert_eq!(resolve_correlation_id(&h, None).as_deref(), Some("req"));
    }

    #[test]
    fn test_empty_headers_fall_through_to_platform_id() {
        let h = headers(&[("x-request-id", "")]);
        assert_eq!(resolve_correlation_id(&h, Some("platform")).as_deref(), Some("platform"));

        let h = headers(&[("x-correlation-id", ""), ("x-request-id", "")]);
        assert_eq!(resolve_correlation_id(&h, Some("platform")).as_deref(), Some("platform"));
        assert_eq!(resolve_correlation_id(&h, Some("")), None);
    }
}
