//! A chat transport that posts messages to an HTTP endpoint.
//!
//! Each message is sent as a single `POST` with a JSON body
//! `{"message": "..."}`. The anti-forgery token is read from the configured
//! cookie string on every request and attached as a header.

#[macro_use]
extern crate tracing;

mod config;
pub mod cookie;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use reqwest::{Client, StatusCode, header};
use sparky_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use tracing::Instrument;

pub use config::{
    DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER, DEFAULT_ENDPOINT,
    HttpTransportConfig, HttpTransportConfigBuilder,
};

/// Error type for [`HttpTransport`].
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
    detail: Option<String>,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
            detail: None,
        }
    }

    fn rejected(status: StatusCode, detail: Option<String>) -> Self {
        Self {
            message: format!("server responded with {status}"),
            kind: ErrorKind::Rejected,
            detail,
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl TransportError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

/// HTTP chat transport.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    config: Arc<HttpTransportConfig>,
}

impl HttpTransport {
    /// Creates a new `HttpTransport` with the given configuration.
    #[inline]
    pub fn new(config: HttpTransportConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Creates a new `HttpTransport` that sends requests through the
    /// given client.
    #[inline]
    pub fn with_client(config: HttpTransportConfig, client: Client) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl ChatTransport for HttpTransport {
    type Error = Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let mut builder = self
            .client
            .post(&self.config.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .json(&proto::ChatBody {
                message: &req.message,
            });
        match self.config.csrf_token() {
            Some(token) => {
                builder = builder.header(&self.config.csrf_header, token);
            }
            None => {
                debug!(
                    "no `{}` cookie, sending without a token",
                    self.config.csrf_cookie
                );
            }
        }
        let resp_fut = builder.send();

        async move {
            let resp = match resp_fut.await {
                Ok(resp) => resp,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Connection,
                    ));
                }
            };

            let status = resp.status();
            trace!(
                "got status {status}, content type {:?}",
                resp.headers().get(header::CONTENT_TYPE)
            );

            let body = match resp.bytes().await {
                Ok(body) => body,
                Err(err) => {
                    return Err(Error::new(
                        format!("{err}"),
                        ErrorKind::Connection,
                    ));
                }
            };

            proto::parse_response(status, &body)
        }
        .instrument(trace_span!("http chat req"))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serves exactly one request with a canned response, and hands back
    /// the raw request it received.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = stream.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&raw) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            String::from_utf8(raw).unwrap()
        });
        (format!("http://{addr}/api/chat/"), server)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        body.len() >= content_length
    }

    fn transport(endpoint: String, cookies: &str) -> HttpTransport {
        let config = HttpTransportConfigBuilder::with_endpoint(endpoint)
            .with_cookies(cookies)
            .build();
        let client = Client::builder().no_proxy().build().unwrap();
        HttpTransport::with_client(config, client)
    }

    #[tokio::test]
    async fn test_wire_format() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"response":"hi"}"#).await;
        let transport = transport(endpoint, "a=1; csrftoken=abc%20def; b=2");

        let reply = transport
            .send_message(&ChatRequest::new("hello"))
            .await
            .unwrap();
        assert_eq!(reply.text, "hi");

        let raw = server.await.unwrap();
        let lowered = raw.to_ascii_lowercase();
        assert!(raw.starts_with("POST /api/chat/ HTTP/1.1\r\n"));
        assert!(lowered.contains("content-type: application/json\r\n"));
        assert!(lowered.contains("x-csrftoken: abc def\r\n"));
        assert!(raw.ends_with(r#"{"message":"hello"}"#));
    }

    #[tokio::test]
    async fn test_missing_token_omits_header() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"response":"hi"}"#).await;
        let transport = transport(endpoint, "sessionid=1");

        transport
            .send_message(&ChatRequest::new("hello"))
            .await
            .unwrap();

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(!raw.contains("x-csrftoken"));
    }

    #[tokio::test]
    async fn test_custom_csrf_names() {
        let (endpoint, server) =
            serve_once("200 OK", r#"{"response":"hi"}"#).await;
        let config = HttpTransportConfigBuilder::with_endpoint(endpoint)
            .with_cookies("csrftoken=wrong; xsrf=t0k")
            .with_csrf_cookie("xsrf")
            .with_csrf_header("X-XSRF-Token")
            .build();
        let client = Client::builder().no_proxy().build().unwrap();
        let transport = HttpTransport::with_client(config, client);

        transport
            .send_message(&ChatRequest::new("hello"))
            .await
            .unwrap();

        let raw = server.await.unwrap().to_ascii_lowercase();
        assert!(raw.contains("x-xsrf-token: t0k\r\n"));
        assert!(!raw.contains("x-csrftoken"));
    }

    #[tokio::test]
    async fn test_server_error() {
        let (endpoint, server) = serve_once(
            "500 Internal Server Error",
            r#"{"error":"An error occurred while contacting the AI."}"#,
        )
        .await;
        let transport = transport(endpoint, "");

        let err = transport
            .send_message(&ChatRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(
            err.detail(),
            Some("An error occurred while contacting the AI.")
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // Bind and drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = transport(format!("http://{addr}/api/chat/"), "");
        let err = transport
            .send_message(&ChatRequest::new("x"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.detail(), None);
    }
}
