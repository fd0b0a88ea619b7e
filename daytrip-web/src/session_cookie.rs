//! The `daytrip_session` cookie.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use daytrip_application::SessionId;

pub const SESSION_COOKIE: &str = "daytrip_session";

/// Reads the session id from the request's `Cookie` headers.
pub fn read(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value))
}

/// `Set-Cookie` value for a session id.
pub fn build(id: SessionId) -> String {
    format!("{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_reads_session_among_other_cookies() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; {SESSION_COOKIE}={id}; lang=en")).unwrap(),
        );
        assert_eq!(read(&headers), Some(id));
    }

    #[test]
    fn test_missing_or_garbled_cookie() {
        let mut headers = HeaderMap::new();
        assert_eq!(read(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("daytrip_session=nope"));
        assert_eq!(read(&headers), None);
    }

    #[test]
    fn test_build_sets_flags() {
        let cookie = build(SessionId::new());
        assert!(cookie.starts_with("daytrip_session="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
    }
}
