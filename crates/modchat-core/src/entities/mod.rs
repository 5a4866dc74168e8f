//! Domain entities - the documents stored behind the gateway

mod conversation;
mod message;
mod registration;
mod session;
mod settings;
mod user;

pub use conversation::Conversation;
pub use message::{Message, MessageKind};
pub use registration::{RegistrationRequest, RequestStatus};
pub use session::Session;
pub use settings::{Availability, Language, Theme, UserSettings};
pub use user::{User, DEFAULT_AVATAR};
