use std::fmt::{self, Debug};

use sparky_transport::ChatRequest;
use tokio::sync::mpsc::{self, UnboundedReceiver, WeakUnboundedSender};
use tokio::sync::oneshot;
use tracing::Instrument;

use crate::conversation::Message;
use crate::labels::CONNECTION_ERROR_TEXT;
use crate::scroll::{ScrollFollower, ScrollRequest};
use crate::state::{Action, ChatState};
use crate::transport_client::TransportClient;

pub(crate) type UpdateFn = Box<dyn Fn(&ChatState) + Send + Sync>;
pub(crate) type ScrollFn = Box<dyn Fn(ScrollRequest) + Send + Sync>;
pub(crate) type IdleFn = Box<dyn Fn() + Send + Sync>;

/// What the store's mailbox carries.
pub(crate) enum Command {
    Apply(Action),
    Snapshot(oneshot::Sender<ChatState>),
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Apply(action) => {
                f.debug_tuple("Apply").field(action).finish()
            }
            Command::Snapshot(_) => f.debug_tuple("Snapshot").finish(),
        }
    }
}

#[derive(Default)]
pub(crate) struct Observers {
    pub on_update: Option<UpdateFn>,
    pub on_scroll: Option<ScrollFn>,
    pub on_idle: Option<IdleFn>,
}

/// Owns the chat state and applies commands to it one at a time.
///
/// The store lives on its own task. Every mutation happens there, in the
/// order commands arrive, so nothing else ever needs to lock the state.
pub(crate) struct Store {
    pub state: ChatState,
    pub client: TransportClient,
    pub follower: ScrollFollower,
    pub observers: Observers,
}

impl Store {
    /// Spawns the store task and returns its mailbox.
    ///
    /// The task ends once every sender is dropped, including the ones
    /// held by requests still in flight.
    pub fn spawn(self) -> mpsc::UnboundedSender<Command> {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let weak_tx = cmd_tx.downgrade();
        tokio::spawn(
            self.run(weak_tx, cmd_rx).instrument(trace_span!("store")),
        );
        cmd_tx
    }

    async fn run(
        mut self,
        cmd_tx: WeakUnboundedSender<Command>,
        mut cmd_rx: UnboundedReceiver<Command>,
    ) {
        debug!("started");
        // The first frame also needs to be drawn and scrolled.
        self.notify();

        while let Some(cmd) = cmd_rx.recv().await {
            trace!("received command: {cmd:?}");
            let proc_span = trace_span!("proc cmd");
            proc_span.in_scope(|| match cmd {
                Command::Apply(action) => self.apply(action, &cmd_tx),
                Command::Snapshot(reply_tx) => {
                    reply_tx.send(self.state.clone()).ok();
                }
            });
        }
        debug!("will terminate");
    }

    fn apply(
        &mut self,
        action: Action,
        cmd_tx: &WeakUnboundedSender<Command>,
    ) {
        let was_busy = self.state.is_busy();
        let revision = self.state.revision();

        if let Some(req) = self.state.reduce(action) {
            self.dispatch(req, cmd_tx);
        }

        if self.state.revision() != revision {
            self.notify();
        }
        if was_busy && !self.state.is_busy() {
            if let Some(on_idle) = &self.observers.on_idle {
                on_idle();
            }
        }
    }

    /// Runs the request on its own task and posts the outcome back.
    fn dispatch(
        &self,
        req: ChatRequest,
        cmd_tx: &WeakUnboundedSender<Command>,
    ) {
        let Some(cmd_tx) = cmd_tx.upgrade() else {
            // Every widget handle is gone, nobody will see the reply.
            warn!("widget has been dropped, discard the request");
            return;
        };

        let client = self.client.clone();
        let request_task =
            tokio::spawn(async move { client.send(req).await });
        tokio::spawn(async move {
            let msg = match request_task.await {
                Ok(msg) => msg,
                Err(err) => {
                    error!("request task failed: {err}");
                    Message::error(CONNECTION_ERROR_TEXT)
                }
            };
            cmd_tx.send(Command::Apply(Action::Settled(msg))).ok();
        });
    }

    fn notify(&mut self) {
        if let Some(on_update) = &self.observers.on_update {
            on_update(&self.state);
        }
        let scroll_req = self.follower.observe(self.state.conversation());
        if let Some(scroll_req) = scroll_req {
            trace!("scroll to {scroll_req:?}");
            if let Some(on_scroll) = &self.observers.on_scroll {
                on_scroll(scroll_req);
            }
        }
    }
}
