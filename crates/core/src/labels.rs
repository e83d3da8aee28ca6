use crate::conversation::Sender;

/// The greeting every conversation starts with, unless configured.
pub const DEFAULT_GREETING: &str =
    "Hello! I'm your Gemini assistant. How can I help you?";
/// Shown when the backend rejects a request without saying why.
pub const UNKNOWN_ERROR_TEXT: &str =
    "Received an unknown error from the server.";
/// Shown when the backend cannot be reached or answers gibberish.
pub const CONNECTION_ERROR_TEXT: &str = "Could not connect to the Django server.";

/// Texts the widget shows to the user.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Labels {
    /// Title above the message list.
    pub title: String,
    /// Label of the user's own messages.
    pub user: String,
    /// Display name of the assistant.
    pub assistant: String,
    /// Label of error messages.
    pub error: String,
    /// Submit control label while idle.
    pub send: String,
    /// Submit control label while a request is in flight.
    pub sending: String,
    /// Input placeholder while idle.
    pub placeholder: String,
    /// Input placeholder while a request is in flight.
    pub waiting_placeholder: String,
}

impl Labels {
    /// Returns the label for a sender.
    #[inline]
    pub fn sender(&self, sender: Sender) -> &str {
        match sender {
            Sender::User => &self.user,
            Sender::Assistant => &self.assistant,
            Sender::Error => &self.error,
        }
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            title: "Gemini Chatbot".to_owned(),
            user: "You".to_owned(),
            assistant: "Sparky".to_owned(),
            error: "System Error".to_owned(),
            send: "Send".to_owned(),
            sending: "Sending...".to_owned(),
            placeholder: "Type your message...".to_owned(),
            waiting_placeholder: "Waiting for response...".to_owned(),
        }
    }
}
