//! The widget's state and the reducer that updates it.

use sparky_transport::ChatRequest;

use crate::conversation::{Conversation, Message};

/// Whether a request is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Ready for the next submission.
    #[default]
    Idle,
    /// Waiting for the backend; submissions are refused.
    Sending,
}

impl Phase {
    /// Returns `true` while a request is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self, Phase::Sending)
    }
}

/// The input form: the draft being typed and the busy flag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub(crate) draft: String,
    pub(crate) phase: Phase,
}

impl InputState {
    /// Returns the text currently in the input.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns the current phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }
}

/// Something that happened to the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The input text changed.
    EditDraft(String),
    /// The form was submitted with the current draft.
    Submit,
    /// The in-flight request settled and produced a message.
    Settled(Message),
}

/// Everything the widget shows.
///
/// The state is owned by exactly one place at a time and only changes
/// through [`ChatState::reduce`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatState {
    pub(crate) conversation: Conversation,
    pub(crate) input: InputState,
    revision: u64,
}

impl ChatState {
    /// Creates a state opened by the given greeting.
    #[inline]
    pub fn with_greeting<S: Into<String>>(greeting: S) -> Self {
        Self {
            conversation: Conversation::with_greeting(greeting),
            input: Default::default(),
            revision: 0,
        }
    }

    /// Returns the conversation.
    #[inline]
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Returns the input form state.
    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Returns `true` while a request is in flight.
    #[inline]
    pub fn is_busy(&self) -> bool {
        self.input.phase.is_busy()
    }

    /// A counter bumped by every change, handy for telling whether an
    /// action did anything.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Applies an action. Returns the request to dispatch, if the action
    /// started one.
    pub fn reduce(&mut self, action: Action) -> Option<ChatRequest> {
        match action {
            Action::EditDraft(text) => {
                self.edit_draft(text);
                None
            }
            Action::Submit => {
                let draft = self.input.draft.clone();
                self.submit(&draft)
            }
            Action::Settled(msg) => {
                self.settle(msg);
                None
            }
        }
    }

    /// Replaces the draft.
    pub fn edit_draft(&mut self, text: String) {
        if self.input.draft != text {
            self.input.draft = text;
            self.revision += 1;
        }
    }

    /// Submits `draft_text`.
    ///
    /// Blank text or a submission while busy is silently refused and
    /// returns `None`. Otherwise the trimmed text is appended as the
    /// user's message, the draft is cleared, the widget turns busy, and
    /// the request to send is returned.
    pub fn submit(&mut self, draft_text: &str) -> Option<ChatRequest> {
        let text = draft_text.trim();
        if text.is_empty() {
            debug!("refusing to submit blank text");
            return None;
        }
        if self.is_busy() {
            debug!("refusing to submit while a request is in flight");
            return None;
        }

        self.conversation.append(Message::user(text));
        self.input.draft.clear();
        self.input.phase = Phase::Sending;
        self.revision += 1;
        Some(ChatRequest::new(text))
    }

    /// Appends the message a request settled with and turns idle.
    pub fn settle(&mut self, msg: Message) {
        if !self.is_busy() {
            warn!("settled without a request in flight: {msg:?}");
        }
        self.conversation.append(msg);
        self.input.phase = Phase::Idle;
        self.revision += 1;
    }
}
