use serde::{Deserialize, Serialize};

/// How the fake backend settles one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetOutcome {
    /// A 2xx answer carrying the reply text.
    #[serde(rename = "reply")]
    Reply(String),
    /// A non-2xx answer, optionally carrying an `error` detail.
    #[serde(rename = "rejected")]
    Rejected(Option<String>),
    /// The backend could not be reached.
    #[serde(rename = "connection_failure")]
    ConnectionFailure,
    /// The backend answered with something that is not a chat reply.
    #[serde(rename = "malformed")]
    Malformed,
}

impl PresetOutcome {
    /// Creates a successful outcome with the given reply.
    #[inline]
    pub fn reply<S: Into<String>>(text: S) -> Self {
        Self::Reply(text.into())
    }

    /// Creates a rejection carrying a server-provided detail.
    #[inline]
    pub fn rejected_with<S: Into<String>>(detail: S) -> Self {
        Self::Rejected(Some(detail.into()))
    }
}
