use std::error::Error;

use crate::error::ErrorKind;
use crate::message::{ChatReply, ChatRequest};

/// The error type for a chat transport.
pub trait TransportError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the detail provided by the backend, if any.
    ///
    /// Only meaningful for [`ErrorKind::Rejected`] errors, where the
    /// backend may explain why it refused the request. Implementors
    /// should return `None` for every other kind.
    fn detail(&self) -> Option<&str> {
        None
    }
}

/// A type that carries chat messages to a backend.
///
/// One call to [`ChatTransport::send_message`] is exactly one round trip.
/// Implementations must not retry, and the returned future always settles
/// (either with a reply or with an error) unless it is dropped.
///
/// Once the transport is created, it should behave like a stateless
/// object. It can still have internal state, but callers should not rely
/// on it, and the transport should be prepared for being dropped anytime.
pub trait ChatTransport: Send + Sync {
    /// The error type that may be returned by the transport.
    type Error: TransportError;

    /// Sends a message to the backend.
    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}
