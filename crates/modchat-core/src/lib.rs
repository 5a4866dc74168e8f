//! # modchat-core
//!
//! Domain layer containing entities, value objects, domain errors, and the
//! persistence gateway port. This crate has no dependency on any concrete
//! storage backend; implementations live in `modchat-store`.

pub mod entities;
pub mod error;
pub mod gateway;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Availability, Conversation, Language, Message, MessageKind, RegistrationRequest,
    RequestStatus, Session, Theme, User, UserSettings, DEFAULT_AVATAR,
};
pub use error::DomainError;
pub use gateway::{
    ChangeEvent, Collection, Gateway, GatewayError, GatewayResult, Subscription, WriteOutcome,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
