//! Session cookie construction and parsing.
//!
//! The session cookie is HttpOnly and SameSite=Lax; `Secure` is appended
//! when configured. Built by hand to keep the attribute set explicit.

use axum::http::HeaderMap;
use axum::http::header::COOKIE;

use gatehouse_core::config::AuthConfig;

/// Builds the `Set-Cookie` value that establishes a session.
pub fn session_cookie(auth: &AuthConfig, session_id: &str) -> String {
    let max_age = auth.session_ttl_minutes * 60;
    let mut cookie = format!(
        "{}={session_id}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}",
        auth.cookie_name
    );
    if auth.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Builds the `Set-Cookie` value that clears the session cookie.
pub fn clear_session_cookie(auth: &AuthConfig) -> String {
    let mut cookie = format!(
        "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
        auth.cookie_name
    );
    if auth.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extracts a cookie value by name from the request headers.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts.next().map(|v| v.to_string());
        }
    }
    None
}
