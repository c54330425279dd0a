//! Shared key-value store served over length-prefixed text frames.
//!
//! - [`listener`] accepts connections and spawns one session task each.
//! - [`session`] runs the read/dispatch/reply loop for a connection.
//! - [`commands`] executes parsed requests against the store and registry.
//! - [`registry`] tracks live sessions so `SELECTED` can close them.
//! - [`store`] is the mutex-guarded mapping every session shares.

pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod listener;
pub mod registry;
pub mod request;
pub mod session;
pub mod store;

pub use codec::Utf8FrameCodec;
pub use config::ServerConfig;
pub use error::{RequestError, ServerError, SessionError, StoreError};
pub use listener::Server;
pub use registry::{DisconnectReport, SessionRegistry};
pub use store::Store;
