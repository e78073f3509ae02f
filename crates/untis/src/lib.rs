//! # untis
//!
//! Client for the WebUntis JSON-RPC API.
//!
//! ## Architecture
//!
//! - **id**: tagged element references (class, teacher, subject, room, student)
//! - **cache**: bounded, time-expiring cache of raw responses
//! - **transport**: HTTP transport trait and its reqwest implementation
//! - **rpc**: JSON-RPC envelopes, error decoding and the cached request pipeline
//! - **parse**: tolerant parsers from raw results into domain entities
//! - **search**: fuzzy name ranking
//! - **session**: login/logout and one method per remote operation

pub mod cache;
pub mod config;
pub mod error;
pub mod id;
pub mod parse;
pub mod rpc;
pub mod search;
pub mod session;
pub mod transport;
pub mod types;

pub use config::{CacheConfig, SessionConfig};
pub use error::{Result, UntisError};
pub use id::{ElementType, Id};
pub use session::Session;
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use types::*;
