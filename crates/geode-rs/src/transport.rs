//! Raw request layer
//!
//! A [`Transport`] issues one request under a fixed API root and hands back
//! the parsed JSON body or a [`TransportError`]. It never retries and never
//! caches; callers decide how stale they can afford to be.

use crate::error::TransportError;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// HTTP methods used by the data-browser API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A path below the API root, kept as raw segments
///
/// Segments are percent-encoded only when the path is rendered, so a region
/// name like `a b/c` stays one segment on the wire.
///
/// ```
/// use geode_rs::ApiPath;
///
/// let path = ApiPath::new("data").join("a b/c");
/// assert_eq!(path.to_string(), "/data/a%20b%2Fc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiPath {
    segments: Vec<String>,
}

impl ApiPath {
    pub fn new(first: impl Into<String>) -> Self {
        Self {
            segments: vec![first.into()],
        }
    }

    /// Append one segment
    pub fn join(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    /// Raw, unencoded segments
    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for ApiPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", urlencoding::encode(segment))?;
        }
        Ok(())
    }
}

/// Query parameters as ordered key/value pairs
pub type Query<'a> = &'a [(&'a str, String)];

/// The request contract every API call goes through
pub trait Transport: Send + Sync {
    fn request(
        &self,
        method: Method,
        path: &ApiPath,
        query: Query<'_>,
    ) -> impl Future<Output = Result<Value, TransportError>> + Send;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    api_root: String,
}

impl HttpTransport {
    /// Create a transport for the given API root (e.g. `http://localhost:8080/api`)
    pub fn new(api_root: &str, timeout: Duration) -> Result<Self, TransportError> {
        let api_root = api_root.trim_end_matches('/').to_string();
        if !(api_root.starts_with("http://") || api_root.starts_with("https://")) {
            return Err(TransportError::InvalidEndpoint(format!(
                "'{}' is not an http(s) URL",
                api_root
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::InvalidEndpoint(e.to_string()))?;

        Ok(Self { http, api_root })
    }

    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    fn url_for(&self, path: &ApiPath) -> String {
        format!("{}{}", self.api_root, path)
    }
}

impl Transport for HttpTransport {
    async fn request(
        &self,
        method: Method,
        path: &ApiPath,
        query: Query<'_>,
    ) -> Result<Value, TransportError> {
        let url = self.url_for(path);
        tracing::debug!("{} {} {:?}", method, url, query);

        let response = self
            .http
            .request(method.into(), &url)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        decode_body(status.as_u16(), &body)
    }
}

/// Turn a status code and body into the transport result
///
/// Non-2xx answers become [`TransportError::Status`], using the body's
/// `error` string when the server supplied one.
pub fn decode_body(status: u16, body: &str) -> Result<Value, TransportError> {
    let parsed = serde_json::from_str::<Value>(body);

    if !(200..300).contains(&status) {
        let message = parsed
            .ok()
            .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(TransportError::Status { status, message });
    }

    Ok(parsed?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_path_encoding() {
        assert_eq!(ApiPath::new("regions").join("info").to_string(), "/regions/info");
        assert_eq!(
            ApiPath::new("data").join("orders?x=1#frag").to_string(),
            "/data/orders%3Fx%3D1%23frag"
        );
        assert_eq!(ApiPath::new("data").join("a b/c").segments()[1], "a b/c");
    }

    #[test]
    fn test_decode_success_body() {
        let value = decode_body(200, r#"{"status":"connected"}"#).unwrap();
        assert_eq!(value, json!({"status": "connected"}));
    }

    #[test]
    fn test_decode_malformed_body() {
        let err = decode_body(200, "<html>oops</html>").unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }

    #[test]
    fn test_decode_error_status_with_message() {
        let err = decode_body(400, r#"{"success":false,"error":"Region already exists: x"}"#)
            .unwrap_err();
        assert_eq!(
            err,
            TransportError::Status {
                status: 400,
                message: "Region already exists: x".to_string()
            }
        );
    }

    #[test]
    fn test_decode_error_status_without_message() {
        let err = decode_body(502, "Bad Gateway").unwrap_err();
        assert_eq!(err.message(), "HTTP 502");
    }

    #[test]
    fn test_rejects_non_http_root() {
        let err = HttpTransport::new("localhost:8080/api", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, TransportError::InvalidEndpoint(_)));

        let transport =
            HttpTransport::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.api_root(), "http://localhost:8080/api");
        assert_eq!(
            transport.url_for(&ApiPath::new("data").join("orders")),
            "http://localhost:8080/api/data/orders"
        );
    }
}
