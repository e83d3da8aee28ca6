//! Core logic of the chat widget: the conversation, the input form, the
//! submission flow, and the projection into a view.

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

#[macro_use]
extern crate tracing;

pub mod conversation;
mod labels;
pub mod scroll;
pub mod state;
mod store;
mod transport_client;
pub mod view;
mod widget;

pub use labels::*;
pub use widget::{ChatWidget, ChatWidgetBuilder};
