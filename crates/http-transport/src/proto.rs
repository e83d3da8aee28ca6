use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use sparky_transport::{ChatReply, ErrorKind};

use crate::Error;

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatBody<'a> {
    pub message: &'a str,
}

// ------------------------------
// Types received from the server
// ------------------------------

// A success body is read as a loose JSON object: `response` holds the
// reply, and older deployments of the chat API answer with `reply`.
const REPLY_FIELDS: [&str; 2] = ["response", "reply"];

// -----------
// Conversions
// -----------

/// Turns a settled HTTP exchange into a reply or a classified error.
///
/// Only the body decides the outcome; the content type is not consulted.
pub fn parse_response(
    status: StatusCode,
    body: &[u8],
) -> Result<ChatReply, Error> {
    if !status.is_success() {
        // The server is expected to explain itself in JSON; anything else
        // is not something we can show to the user.
        let value: Value = serde_json::from_slice(body).map_err(|err| {
            Error::new(
                format!("non-JSON error body with status {status}: {err}"),
                ErrorKind::Malformed,
            )
        })?;
        let detail = value
            .get("error")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        return Err(Error::rejected(status, detail));
    }

    let value: Value = serde_json::from_slice(body).map_err(|err| {
        Error::new(format!("invalid reply body: {err}"), ErrorKind::Malformed)
    })?;
    // The first field present decides; a non-string value is not a reply.
    let field = REPLY_FIELDS
        .iter()
        .find_map(|name| value.get(*name).filter(|v| !v.is_null()));
    match field.and_then(Value::as_str) {
        Some(text) => Ok(ChatReply::new(text)),
        None => Err(Error::new(
            "reply body has no string `response` field",
            ErrorKind::Malformed,
        )),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sparky_transport::TransportError;

    use super::*;

    #[test]
    fn test_request_body() {
        let body = ChatBody { message: "hello" };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "message": "hello" })
        );
    }

    #[test]
    fn test_success() {
        let reply =
            parse_response(StatusCode::OK, br#"{"response":"hi"}"#).unwrap();
        assert_eq!(reply.text, "hi");
    }

    #[test]
    fn test_success_with_reply_field() {
        let reply =
            parse_response(StatusCode::OK, br#"{"reply":"hey"}"#).unwrap();
        assert_eq!(reply.text, "hey");
    }

    #[test]
    fn test_success_ignores_stray_reply_field() {
        let reply =
            parse_response(StatusCode::OK, br#"{"response":"hi","reply":7}"#)
                .unwrap();
        assert_eq!(reply.text, "hi");

        let reply = parse_response(
            StatusCode::OK,
            br#"{"response":"hi","reply":"old","extra":[1,2]}"#,
        )
        .unwrap();
        assert_eq!(reply.text, "hi");
    }

    #[test]
    fn test_success_without_reply_is_malformed() {
        let err =
            parse_response(StatusCode::OK, br#"{"summary":"x"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err =
            parse_response(StatusCode::OK, br#"{"reply":7}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let err = parse_response(StatusCode::OK, br#"{"response":["hi"]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_success_with_non_json_body() {
        let err = parse_response(StatusCode::OK, b"<h1>ok</h1>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
    }

    #[test]
    fn test_rejected_with_detail() {
        let err = parse_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"error":"bad"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.detail(), Some("bad"));
    }

    #[test]
    fn test_rejected_without_detail() {
        let err = parse_response(
            StatusCode::METHOD_NOT_ALLOWED,
            br#"{"detail":"Method not allowed"}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Rejected);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn test_rejected_with_html_body() {
        let err = parse_response(
            StatusCode::FORBIDDEN,
            b"<h1>CSRF verification failed.</h1>",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed);
        assert_eq!(err.detail(), None);
    }
}
