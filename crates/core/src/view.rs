//! Projection of the state into what a front end draws.
//!
//! Nothing here mutates anything; front ends call [`project`] after every
//! update and draw the result however they like.

use crate::conversation::{Message, Sender};
use crate::labels::Labels;
use crate::state::ChatState;

/// Which side of the message list a row sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    /// Messages from anyone but the user.
    Left,
    /// The user's own messages.
    Right,
}

/// The color scheme of a message bubble.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bubble {
    /// Highlighted, for the user's own messages.
    Own,
    /// Neutral, for everything else.
    Other,
}

/// One message as displayed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRow {
    /// Label of the sender.
    pub sender: String,
    /// The message text.
    pub text: String,
    /// Side of the list.
    pub align: Align,
    /// Bubble colors.
    pub bubble: Bubble,
}

/// The text input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputView {
    /// Current draft.
    pub value: String,
    /// Hint shown while the draft is empty.
    pub placeholder: String,
    /// Whether typing is blocked.
    pub disabled: bool,
}

/// The submit control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ButtonView {
    /// Text on the control.
    pub label: String,
    /// Whether the control is blocked.
    pub disabled: bool,
}

/// A complete frame of the widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    /// Title above the list.
    pub title: String,
    /// Messages, oldest first.
    pub rows: Vec<MessageRow>,
    /// The text input.
    pub input: InputView,
    /// The submit control.
    pub send_button: ButtonView,
}

/// Projects the state into a frame.
pub fn project(state: &ChatState, labels: &Labels) -> ViewModel {
    let busy = state.is_busy();
    ViewModel {
        title: labels.title.clone(),
        rows: state
            .conversation()
            .messages()
            .iter()
            .map(|msg| project_message(msg, labels))
            .collect(),
        input: InputView {
            value: state.input().draft().to_owned(),
            placeholder: if busy {
                labels.waiting_placeholder.clone()
            } else {
                labels.placeholder.clone()
            },
            disabled: busy,
        },
        send_button: ButtonView {
            label: if busy {
                labels.sending.clone()
            } else {
                labels.send.clone()
            },
            disabled: busy,
        },
    }
}

/// Projects a single message.
pub fn project_message(msg: &Message, labels: &Labels) -> MessageRow {
    let own = msg.sender() == Sender::User;
    MessageRow {
        sender: labels.sender(msg.sender()).to_owned(),
        text: msg.text().to_owned(),
        align: if own { Align::Right } else { Align::Left },
        bubble: if own { Bubble::Own } else { Bubble::Other },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_frame() {
        let labels = Labels::default();
        let mut state = ChatState::with_greeting("Hello!");
        state.edit_draft("typing".to_owned());

        let view = project(&state, &labels);
        assert_eq!(view.title, "Gemini Chatbot");
        assert_eq!(
            view.rows,
            [MessageRow {
                sender: "Sparky".to_owned(),
                text: "Hello!".to_owned(),
                align: Align::Left,
                bubble: Bubble::Other,
            }]
        );
        assert_eq!(view.input.value, "typing");
        assert_eq!(view.input.placeholder, "Type your message...");
        assert!(!view.input.disabled);
        assert_eq!(view.send_button.label, "Send");
        assert!(!view.send_button.disabled);
    }

    #[test]
    fn test_busy_frame() {
        let labels = Labels::default();
        let mut state = ChatState::with_greeting("Hello!");
        state.submit("hey");

        let view = project(&state, &labels);
        let own = &view.rows[1];
        assert_eq!(own.sender, "You");
        assert_eq!(own.align, Align::Right);
        assert_eq!(own.bubble, Bubble::Own);
        assert_eq!(view.input.placeholder, "Waiting for response...");
        assert!(view.input.disabled);
        assert_eq!(view.send_button.label, "Sending...");
        assert!(view.send_button.disabled);
    }

    #[test]
    fn test_error_rows_sit_left() {
        let labels = Labels {
            assistant: "Ada".to_owned(),
            ..Default::default()
        };
        let row = project_message(&Message::error("boom"), &labels);
        assert_eq!(row.sender, "System Error");
        assert_eq!(row.align, Align::Left);
        assert_eq!(row.bubble, Bubble::Other);

        let row = project_message(&Message::assistant("hi"), &labels);
        assert_eq!(row.sender, "Ada");
    }
}
