//! Persistence gateway port
//!
//! The domain layer defines what it needs from a document store; the
//! `modchat-store` crate provides interchangeable implementations (in-memory,
//! file-backed, primary-with-local-fallback).

mod events;
mod port;

pub use events::{ChangeEvent, Subscription};
pub use port::{Collection, Gateway, GatewayError, GatewayResult, WriteOutcome};
