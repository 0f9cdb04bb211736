use reqwest::{
    header::{HeaderValue, CONTENT_TYPE, SET_COOKIE},
    Response,
};

/// Adds extra functionality to `reqwest::Response`.
pub trait ResponseExt {
    /// Returns true if the response has a `Content-Type` header indicating it is HTML.
    fn is_html(&self) -> bool;

    /// Folds every `Set-Cookie` header into a single value fit for a `Cookie` header.
    fn session_cookie(&self) -> Option<HeaderValue>;
}

impl ResponseExt for Response {
    fn is_html(&self) -> bool {
        self.headers()
            .get(CONTENT_TYPE)
            .and_then(|content_type| content_type.to_str().ok())
            .map(|t| t.starts_with("text/html"))
            .unwrap_or(false)
    }

    fn session_cookie(&self) -> Option<HeaderValue> {
        // Only the name=value pair is sent back, attributes stay with the client.
        let pairs = self
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .collect::<Vec<_>>();
        if pairs.is_empty() {
            return None;
        }
        HeaderValue::from_str(&pairs.join("; ")).ok()
    }
}
