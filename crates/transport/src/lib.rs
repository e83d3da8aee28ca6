//! The boundary between the chat widget and a chat backend.
//!
//! This crate defines what a transport adapter is: something that takes
//! one plain-text user message, performs a single round trip to a backend
//! and settles with either a reply or an error. The widget never talks to
//! the network directly, it only sees the types defined here, so the
//! backend can be swapped (a real HTTP endpoint, a scripted fake in tests)
//! without touching the core.
//!
//! Types in this crate don't define any behavior, instead they are the
//! constraints that the implementors should adhere to.

#![deny(missing_docs)]

mod error;
mod message;
mod transport;

pub use error::*;
pub use message::*;
pub use transport::*;
