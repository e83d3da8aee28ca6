//! A terminal chat client for the Sparky assistant.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to put the chat widget into your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

pub mod config;
pub mod render;

pub use config::AppConfig;

/// Re-exports of [`sparky_core`] crate.
pub mod core {
    pub use sparky_core::*;
}

/// Re-exports of [`sparky_transport`] and [`sparky_http_transport`].
pub mod transport {
    pub use sparky_http_transport::{
        HttpTransport, HttpTransportConfig, HttpTransportConfigBuilder,
    };
    pub use sparky_transport::*;
}
