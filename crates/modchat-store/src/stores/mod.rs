//! Typed document stores
//!
//! Thin typed wrappers over `Arc<dyn Gateway>`: serde encoding plus the
//! filtered queries the service layer needs. Each store handles exactly one
//! collection.

mod conversations;
mod messages;
mod requests;
mod session;
mod users;

pub use conversations::ConversationStore;
pub use messages::MessageStore;
pub use requests::RegistrationStore;
pub use session::SessionStore;
pub use users::UserStore;

use modchat_core::DomainError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

/// Decode a stored document into an entity
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> StoreResult<T> {
    serde_json::from_value(value)
        .map_err(|err| DomainError::StorageError(format!("corrupt document: {err}")))
}

/// Encode an entity for storage
pub(crate) fn encode<T: Serialize>(entity: &T) -> StoreResult<Value> {
    serde_json::to_value(entity)
        .map_err(|err| DomainError::StorageError(format!("unencodable document: {err}")))
}

/// Decode every document of a listing, skipping nothing: one corrupt
/// document fails the whole read rather than silently dropping data.
pub(crate) fn decode_all<T: DeserializeOwned>(values: Vec<Value>) -> StoreResult<Vec<T>> {
    values.into_iter().map(decode).collect()
}
