//! Keeps the newest message in view.

use crate::conversation::Conversation;

/// How the view should move to the requested position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScrollBehavior {
    /// Animate towards the target.
    #[default]
    Smooth,
    /// Jump straight to the target.
    Instant,
}

/// Asks the view to bring a position of the message list into view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ScrollRequest {
    /// Index of the end sentinel, which sits right after the last
    /// message. Equal to the number of messages.
    pub anchor: usize,
    /// How to get there.
    pub behavior: ScrollBehavior,
}

/// A post-update hook that requests a scroll whenever the conversation
/// grows.
///
/// It only looks at the conversation length, so edits to the draft or
/// the busy flag never move the view.
#[derive(Clone, Debug, Default)]
pub struct ScrollFollower {
    seen: Option<usize>,
    behavior: ScrollBehavior,
}

impl ScrollFollower {
    /// Creates a follower that scrolls with the given behavior.
    #[inline]
    pub fn with_behavior(behavior: ScrollBehavior) -> Self {
        Self {
            seen: None,
            behavior,
        }
    }

    /// Observes the conversation after an update.
    ///
    /// The first observation always requests a scroll, so the view starts
    /// at the bottom.
    pub fn observe(
        &mut self,
        conversation: &Conversation,
    ) -> Option<ScrollRequest> {
        let len = conversation.len();
        if self.seen == Some(len) {
            return None;
        }
        self.seen = Some(len);
        Some(ScrollRequest {
            anchor: len,
            behavior: self.behavior,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[test]
    fn test_scrolls_on_mount() {
        let mut follower = ScrollFollower::default();
        let conversation = Conversation::with_greeting("Hi");
        assert_eq!(
            follower.observe(&conversation),
            Some(ScrollRequest {
                anchor: 1,
                behavior: ScrollBehavior::Smooth,
            })
        );
        assert_eq!(follower.observe(&conversation), None);
    }

    #[test]
    fn test_scrolls_on_each_append() {
        let mut follower =
            ScrollFollower::with_behavior(ScrollBehavior::Instant);
        let mut conversation = Conversation::with_greeting("Hi");
        follower.observe(&conversation);

        conversation.append(Message::user("a"));
        let req = follower.observe(&conversation).unwrap();
        assert_eq!(req.anchor, 2);
        assert_eq!(req.behavior, ScrollBehavior::Instant);

        conversation.append(Message::assistant("b"));
        assert_eq!(follower.observe(&conversation).unwrap().anchor, 3);
        assert_eq!(follower.observe(&conversation), None);
    }
}
