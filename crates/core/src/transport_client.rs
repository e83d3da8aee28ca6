use std::pin::Pin;
use std::sync::Arc;

use sparky_transport::{ChatReply, ChatRequest, ChatTransport, TransportError};
use tracing::Instrument;

use crate::conversation::Message;
use crate::labels::{CONNECTION_ERROR_TEXT, UNKNOWN_ERROR_TEXT};

type SendResult = Result<ChatReply, Box<dyn TransportError>>;
type BoxedSendFuture = Pin<Box<dyn Future<Output = SendResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ChatRequest) -> BoxedSendFuture + Send + Sync>;

/// A wrapper around a chat transport that provides a type-erased
/// interface for the other modules, and turns whatever the transport
/// settles with into the message to show.
#[derive(Clone)]
pub struct TransportClient {
    handler_fn: HandlerFn,
}

impl TransportClient {
    #[inline]
    pub fn new<T: ChatTransport + 'static>(transport: T) -> Self {
        // Erase `T` so the store doesn't need a generic parameter.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let fut = transport.send_message(&req);
            Box::pin(
                async move {
                    trace!("got a request: {:?}", req);
                    fut.await.map_err(|err| {
                        Box::new(err) as Box<dyn TransportError>
                    })
                }
                .instrument(trace_span!("transport client req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the message it settled with.
    ///
    /// This never fails: errors become error messages.
    #[inline]
    pub async fn send(&self, req: ChatRequest) -> Message {
        let result = (self.handler_fn)(req).await;
        settled_message(result)
    }
}

/// Maps a settled request to the single message appended for it.
fn settled_message(result: SendResult) -> Message {
    let err = match result {
        Ok(reply) => {
            trace!("finished a request");
            return Message::assistant(reply.text);
        }
        Err(err) => err,
    };

    if err.kind().is_server_reported() {
        warn!("request rejected: {err}");
        let detail = err.detail().filter(|detail| !detail.is_empty());
        return Message::error(detail.unwrap_or(UNKNOWN_ERROR_TEXT));
    }

    error!("request failed ({}): {err}", err.kind());
    Message::error(CONNECTION_ERROR_TEXT)
}
