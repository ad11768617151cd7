use axum::http::{HeaderMap, header};

use super::tokens::SESSION_TTL_SECS;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Build the `Set-Cookie` value carrying a freshly minted session token.
/// `Max-Age` matches the token's validity window; `secure` is set outside
/// development so the cookie never travels over plain HTTP in production.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Strict; Path=/; Max-Age={SESSION_TTL_SECS}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build the `Set-Cookie` value that clears the session cookie on logout.
pub fn clearing_cookie(secure: bool) -> String {
    let mut cookie =
        format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Strict; Path=/; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Extract the session token from the request `Cookie` header, if present.
pub fn session_token_from_cookies(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let parts: Vec<&str> = cookie.trim().splitn(2, '=').collect();
            if parts.len() == 2 && parts[0] == SESSION_COOKIE {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("abc.def.ghi", false);
        assert_eq!(
            cookie,
            "token=abc.def.ghi; HttpOnly; SameSite=Strict; Path=/; Max-Age=3600"
        );

        let secure = session_cookie("abc.def.ghi", true);
        assert!(secure.ends_with("; Secure"));
    }

    #[test]
    fn clearing_cookie_expires_immediately() {
        assert!(clearing_cookie(false).contains("Max-Age=0"));
    }

    #[test]
    fn extracts_token_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; token=abc.def.ghi; lang=en"),
        );

        assert_eq!(
            session_token_from_cookies(&headers),
            Some("abc.def.ghi".to_string())
        );
    }

    #[test]
    fn missing_cookie_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token_from_cookies(&headers), None);
        assert_eq!(session_token_from_cookies(&HeaderMap::new()), None);
    }
}
