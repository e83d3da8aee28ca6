use std::sync::Arc;

use sparky_transport::ChatTransport;
use tokio::sync::{mpsc, oneshot};

use crate::labels::{DEFAULT_GREETING, Labels};
use crate::scroll::{ScrollBehavior, ScrollFollower, ScrollRequest};
use crate::state::{Action, ChatState};
use crate::store::{Command, Observers, Store};
use crate::transport_client::TransportClient;
use crate::view::{self, ViewModel};

/// [`ChatWidget`] builder.
pub struct ChatWidgetBuilder {
    client: TransportClient,
    greeting: Option<String>,
    labels: Labels,
    scroll_behavior: ScrollBehavior,
    observers: Observers,
}

impl ChatWidgetBuilder {
    /// Creates a new builder with the specified transport.
    #[inline]
    pub fn with_transport<T: ChatTransport + 'static>(transport: T) -> Self {
        Self {
            client: TransportClient::new(transport),
            greeting: None,
            labels: Labels::default(),
            scroll_behavior: ScrollBehavior::default(),
            observers: Observers::default(),
        }
    }

    /// Sets the assistant's opening message.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Sets the texts shown by the widget.
    #[inline]
    pub fn with_labels(mut self, labels: Labels) -> Self {
        self.labels = labels;
        self
    }

    /// Sets how the view should scroll to new messages.
    #[inline]
    pub fn with_scroll_behavior(mut self, behavior: ScrollBehavior) -> Self {
        self.scroll_behavior = behavior;
        self
    }

    /// Attaches a callback to be invoked after every state change, and
    /// once with the initial state.
    #[inline]
    pub fn on_update(
        mut self,
        on_update: impl Fn(&ChatState) + Send + Sync + 'static,
    ) -> Self {
        self.observers.on_update = Some(Box::new(on_update));
        self
    }

    /// Attaches a callback to be invoked when the view should scroll to
    /// the newest message. Always runs after the matching update.
    #[inline]
    pub fn on_scroll(
        mut self,
        on_scroll: impl Fn(ScrollRequest) + Send + Sync + 'static,
    ) -> Self {
        self.observers.on_scroll = Some(Box::new(on_scroll));
        self
    }

    /// Attaches a callback to be invoked when a request settles and the
    /// widget becomes idle again.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.observers.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the widget.
    ///
    /// # Panics
    ///
    /// Panics if called outside of a Tokio runtime.
    #[inline]
    pub fn build(self) -> ChatWidget {
        let Self {
            client,
            greeting,
            labels,
            scroll_behavior,
            observers,
        } = self;

        let greeting =
            greeting.unwrap_or_else(|| DEFAULT_GREETING.to_owned());
        let store = Store {
            state: ChatState::with_greeting(greeting),
            client,
            follower: ScrollFollower::with_behavior(scroll_behavior),
            observers,
        };
        ChatWidget {
            cmd_tx: store.spawn(),
            labels: Arc::new(labels),
        }
    }
}

/// A chat widget instance: a conversation, an input form, and a transport
/// to talk to the backend.
///
/// The handle is cheap to clone. All clones drive the same widget, and the
/// widget goes away once the last clone is dropped and no request is in
/// flight.
#[derive(Clone)]
pub struct ChatWidget {
    cmd_tx: mpsc::UnboundedSender<Command>,
    labels: Arc<Labels>,
}

impl ChatWidget {
    /// Replaces the text in the input.
    #[inline]
    pub fn set_draft<S: Into<String>>(&self, text: S) {
        self.apply(Action::EditDraft(text.into()));
    }

    /// Submits the current draft.
    ///
    /// Does nothing if the draft is blank or a request is in flight.
    #[inline]
    pub fn submit_draft(&self) {
        self.apply(Action::Submit);
    }

    /// Puts `text` into the input and submits it.
    ///
    /// Does nothing but update the draft if `text` is blank or a request is
    /// in flight.
    #[inline]
    pub fn submit<S: Into<String>>(&self, text: S) {
        self.set_draft(text);
        self.submit_draft();
    }

    /// Returns a copy of the current state.
    ///
    /// Commands sent before this call are applied first.
    pub async fn snapshot(&self) -> ChatState {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Command::Snapshot(reply_tx));
        reply_rx.await.expect("widget store has been dropped too early")
    }

    /// Returns the current frame.
    #[inline]
    pub async fn view(&self) -> ViewModel {
        view::project(&self.snapshot().await, &self.labels)
    }

    /// Returns the texts the widget shows.
    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[inline]
    fn apply(&self, action: Action) {
        self.send(Command::Apply(action));
    }

    #[inline]
    fn send(&self, cmd: Command) {
        self.cmd_tx
            .send(cmd)
            .expect("widget store has been dropped too early");
    }
}
