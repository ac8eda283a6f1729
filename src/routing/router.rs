//! Route lookup.
//!
//! # Rules (in order, first match wins)
//! 1. `GET /health`
//! 2. `POST /visit`
//! 3. `GET /visit/{id}`, where `id` is the final path segment
//! 4. anything else: `NotFound`
//!
//! Method and path comparisons are exact (case-sensitive).

const VISIT_PREFIX: &str = "/visit/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Health,
    CreateVisit,
    GetVisit { id: String },
    NotFound,
}

impl Route {
    /// Label used in metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Route::Health => "health",
            Route::CreateVisit => "create_visit",
            Route::GetVisit { .. } => "get_visit",
            Route::NotFound => "not_found",
        }
    }
}

pub fn match_route(method: &str, path: &str) -> Route {
    match method {
        "GET" if path == "/health" => Route::Health,
        "POST" if path == "/visit" => Route::CreateVisit,
        "GET" if path.starts_with(VISIT_PREFIX) => {
            let id = path.rsplit('/').next().unwrap_or_default();
            Route::GetVisit { id: id.to_string() }
        }
        _ => Route::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_routes() {
        assert_eq!(match_route("GET", "/health"), Route::Health);
        assert_eq!(match_route("POST", "/visit"), Route::CreateVisit);
        assert_eq!(match_route("GET", "/visit/abc"), Route::GetVisit { id: "abc".into() });
    }

    #[test]
    fn test_id_is_final_segment() {
        assert_eq!(match_route("GET", "/visit/a/b"), Route::GetVisit { id: "b".into() });
        assert_eq!(match_route("GET", "/visit/"), Route::GetVisit { id: String::new() });
    }

    #[test]
    fn test_everything_else_is_not_found() {
        for (method, path) in [
            ("POST", "/health"),
            ("GET", "/visit"),
            ("PUT", "/visit"),
            ("DELETE", "/visit/abc"),
            ("get", "/health"),
            ("GET", "/Health"),
            ("GET", "/unknown/path"),
            ("GET", "/"),
            ("", ""),
        ] {
            assert_eq!(match_route(method, path), Route::NotFound, "{} {}", method, path);
        }
    }
}
