use std::fmt::Debug;

use crate::cookie;

/// Default endpoint of the chat API.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/chat/";
/// Name of the cookie that carries the anti-forgery token.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";
/// Name of the header the anti-forgery token is sent in.
pub const DEFAULT_CSRF_HEADER: &str = "X-CSRFToken";

/// Builder for [`HttpTransportConfig`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpTransportConfigBuilder {
    endpoint: String,
    cookies: Option<String>,
    csrf_cookie: Option<String>,
    csrf_header: Option<String>,
}

impl HttpTransportConfigBuilder {
    /// Creates a builder posting to the given endpoint.
    #[inline]
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
            cookies: None,
            csrf_cookie: None,
            csrf_header: None,
        }
    }

    /// Sets the cookie string of the browsing context, in the same
    /// format as a `Cookie` request header.
    #[inline]
    pub fn with_cookies<S: Into<String>>(mut self, cookies: S) -> Self {
        self.cookies = Some(cookies.into());
        self
    }

    /// Sets a custom name for the anti-forgery cookie.
    #[inline]
    pub fn with_csrf_cookie<S: Into<String>>(mut self, name: S) -> Self {
        self.csrf_cookie = Some(name.into());
        self
    }

    /// Sets a custom name for the anti-forgery header.
    #[inline]
    pub fn with_csrf_header<S: Into<String>>(mut self, name: S) -> Self {
        self.csrf_header = Some(name.into());
        self
    }

    /// Builds the configuration.
    #[inline]
    pub fn build(self) -> HttpTransportConfig {
        HttpTransportConfig {
            endpoint: self.endpoint,
            cookies: self.cookies.unwrap_or_default(),
            csrf_cookie: self
                .csrf_cookie
                .unwrap_or_else(|| DEFAULT_CSRF_COOKIE.to_string()),
            csrf_header: self
                .csrf_header
                .unwrap_or_else(|| DEFAULT_CSRF_HEADER.to_string()),
        }
    }
}

impl Default for HttpTransportConfigBuilder {
    #[inline]
    fn default() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }
}

impl Debug for HttpTransportConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportConfigBuilder")
            .field("endpoint", &self.endpoint)
            .field("cookies", &"<deducted>")
            .field("csrf_cookie", &self.csrf_cookie)
            .field("csrf_header", &self.csrf_header)
            .finish()
    }
}

/// Configuration for the HTTP transport.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct HttpTransportConfig {
    pub(crate) endpoint: String,
    pub(crate) cookies: String,
    pub(crate) csrf_cookie: String,
    pub(crate) csrf_header: String,
}

impl HttpTransportConfig {
    /// Returns the endpoint requests are posted to.
    #[inline]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Reads the anti-forgery token out of the configured cookies.
    #[inline]
    pub fn csrf_token(&self) -> Option<String> {
        cookie::lookup(&self.cookies, &self.csrf_cookie)
    }
}

impl Debug for HttpTransportConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransportConfig")
            .field("endpoint", &self.endpoint)
            .field("cookies", &"<deducted>")
            .field("csrf_cookie", &self.csrf_cookie)
            .field("csrf_header", &self.csrf_header)
            .finish()
    }
}
