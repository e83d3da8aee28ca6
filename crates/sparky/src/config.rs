//! Configuration read from the environment.

use std::env;
use std::fmt::{self, Debug};

use sparky_core::Labels;
use sparky_http_transport::{
    DEFAULT_ENDPOINT, HttpTransportConfig, HttpTransportConfigBuilder,
};

/// Endpoint of the chat API.
pub const ENV_CHAT_URL: &str = "SPARKY_CHAT_URL";
/// Cookie string carrying the anti-forgery token.
pub const ENV_COOKIES: &str = "SPARKY_COOKIES";
/// Display name of the assistant.
pub const ENV_ASSISTANT_NAME: &str = "SPARKY_ASSISTANT_NAME";
/// Opening message of the assistant.
pub const ENV_GREETING: &str = "SPARKY_GREETING";

/// Settings of the terminal client.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Where messages are posted.
    pub endpoint: Option<String>,
    /// Cookies of the logged-in session, as a `Cookie` header string.
    pub cookies: Option<String>,
    /// Overrides the assistant's display name.
    pub assistant_name: Option<String>,
    /// Overrides the assistant's greeting.
    pub greeting: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from environment variables.
    #[inline]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key).filter(|value| !value.trim().is_empty())
        };
        Self {
            endpoint: get(ENV_CHAT_URL),
            cookies: get(ENV_COOKIES),
            assistant_name: get(ENV_ASSISTANT_NAME),
            greeting: get(ENV_GREETING),
        }
    }

    /// Returns the endpoint, falling back to the default one.
    #[inline]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    /// Builds the transport configuration.
    pub fn transport_config(&self) -> HttpTransportConfig {
        let mut builder =
            HttpTransportConfigBuilder::with_endpoint(self.endpoint());
        if let Some(cookies) = &self.cookies {
            builder = builder.with_cookies(cookies.clone());
        }
        builder.build()
    }

    /// Builds the texts shown by the widget.
    pub fn labels(&self) -> Labels {
        let mut labels = Labels::default();
        if let Some(name) = &self.assistant_name {
            labels.assistant = name.clone();
        }
        labels
    }
}

impl Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("endpoint", &self.endpoint)
            .field("cookies", &self.cookies.as_ref().map(|_| "<deducted>"))
            .field("assistant_name", &self.assistant_name)
            .field("greeting", &self.greeting)
            .finish()
    }
}
