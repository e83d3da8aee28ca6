//! A scripted fake chat backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::error::Error as StdError;
use std::fmt::{self, Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sparky_transport::{
    ChatReply, ChatRequest, ChatTransport, ErrorKind, TransportError,
};
use tokio::sync::Notify;
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    message: &'static str,
    kind: ErrorKind,
    detail: Option<String>,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
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

/// Holds requests until the test opens it.
///
/// Each call to [`Gate::open`] lets exactly one pending (or future)
/// request through.
#[derive(Clone, Debug)]
pub struct Gate(Arc<Notify>);

impl Gate {
    #[inline]
    pub fn open(&self) {
        self.0.notify_one();
    }
}

/// A local fake backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// backend should settle each request. Outcomes are consumed in the order
/// they were added, one per request. If the script runs out, requests fail
/// with a connection error.
///
/// Clones share the script and the request log, so a test can keep a clone
/// around to inspect what was sent after handing the transport over.
#[derive(Clone, Default)]
pub struct TestTransport {
    script: Arc<Mutex<VecDeque<PresetOutcome>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
    delay: Option<Duration>,
    gate: Option<Gate>,
}

impl TestTransport {
    #[inline]
    pub fn add_outcome(&mut self, outcome: PresetOutcome) {
        lock(&self.script).push_back(outcome);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Makes every request wait for the returned gate to be opened.
    #[inline]
    pub fn set_gate(&mut self) -> Gate {
        let gate = Gate(Arc::new(Notify::new()));
        self.gate = Some(gate.clone());
        gate
    }

    /// Returns the requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        lock(&self.requests).clone()
    }
}

impl ChatTransport for TestTransport {
    type Error = crate::Error;

    fn send_message(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        lock(&self.requests).push(req.clone());
        let outcome = lock(&self.script).pop_front();
        let delay = self.delay;
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.0.notified().await;
            }
            sleep(delay.unwrap_or(Duration::from_millis(1))).await;

            match outcome {
                Some(PresetOutcome::Reply(text)) => Ok(ChatReply::new(text)),
                Some(PresetOutcome::Rejected(detail)) => Err(Error {
                    message: "rejected by script",
                    kind: ErrorKind::Rejected,
                    detail,
                }),
                Some(PresetOutcome::ConnectionFailure) => Err(Error {
                    message: "connection refused by script",
                    kind: ErrorKind::Connection,
                    detail: None,
                }),
                Some(PresetOutcome::Malformed) => Err(Error {
                    message: "malformed by script",
                    kind: ErrorKind::Malformed,
                    detail: None,
                }),
                None => Err(Error {
                    message: "no enough steps",
                    kind: ErrorKind::Connection,
                    detail: None,
                }),
            }
        }
    }
}

#[inline]
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
