//! Conversation-related types.

/// Who a message comes from.
///
/// The kind decides how a message is presented; the text shown next to it
/// comes from [`Labels`](crate::Labels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the widget.
    User,
    /// The backend's assistant.
    Assistant,
    /// The widget itself, reporting a failed submission.
    Error,
}

/// A message in the conversation. Messages never change once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    sender: Sender,
    text: String,
}

impl Message {
    /// Creates a message.
    #[inline]
    pub fn new<S: Into<String>>(sender: Sender, text: S) -> Self {
        Self {
            sender,
            text: text.into(),
        }
    }

    /// Creates a message sent by the user.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates a message sent by the assistant.
    #[inline]
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Creates an error message.
    #[inline]
    pub fn error<S: Into<String>>(text: S) -> Self {
        Self::new(Sender::Error, text)
    }

    /// Returns the sender of this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Represents a conversation.
///
/// The only way to change a conversation is appending to it, so the
/// position of a message is also its display order.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Conversation {
    pub(crate) items: Vec<Message>,
}

impl Conversation {
    /// Creates a conversation opened by an assistant greeting.
    #[inline]
    pub fn with_greeting<S: Into<String>>(greeting: S) -> Self {
        Self {
            items: vec![Message::assistant(greeting)],
        }
    }

    #[inline]
    pub(crate) fn append(&mut self, msg: Message) {
        self.items.push(msg);
    }

    /// Returns all messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.items
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&Message> {
        self.items.last()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the conversation has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting() {
        let conversation = Conversation::with_greeting("Hello!");
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.last(), Some(&Message::assistant("Hello!")));
    }

    #[test]
    fn test_append_keeps_order() {
        let mut conversation = Conversation::default();
        assert!(conversation.is_empty());
        conversation.append(Message::user("a"));
        conversation.append(Message::assistant("b"));
        conversation.append(Message::user("a"));

        let texts: Vec<_> =
            conversation.messages().iter().map(Message::text).collect();
        assert_eq!(texts, ["a", "b", "a"]);
        assert_eq!(conversation.messages()[1].sender(), Sender::Assistant);
    }
}
