//! # modchat-store
//!
//! Persistence layer implementing the gateway port defined in `modchat-core`.
//!
//! ## Overview
//!
//! Three interchangeable gateway implementations:
//!
//! - [`MemoryStore`] - volatile in-memory documents (the mock-data backend)
//! - [`FileStore`] - one JSON file per collection (the localStorage analog)
//! - [`FallbackGateway`] - a primary store with a transparent local fallback
//!
//! plus typed stores (users, messages, conversations, registration requests,
//! session) that wrap `Arc<dyn Gateway>` with serde encoding and the filtered
//! queries the services need.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use modchat_store::{open_gateway, UserStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = modchat_common::AppConfig::from_env()?;
//!     let gateway = open_gateway(&config.storage);
//!     let users = UserStore::new(gateway);
//!     // Use the store...
//!     Ok(())
//! }
//! ```

pub mod backends;
pub mod stores;
pub mod testing;

mod factory;

// Re-export commonly used types
pub use backends::{FallbackGateway, FileStore, MemoryStore};
pub use factory::open_gateway;
pub use stores::{
    ConversationStore, MessageStore, RegistrationStore, SessionStore, StoreResult, UserStore,
};
