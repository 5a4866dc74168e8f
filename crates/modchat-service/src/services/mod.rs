//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod admin;
pub mod auth;
pub mod context;
pub mod conversation;
pub mod error;
pub mod message;
pub mod typing;
pub mod user;

// Re-export all services for convenience
pub use admin::AdminService;
pub use auth::AuthService;
pub use context::ServiceContext;
pub use conversation::ConversationService;
pub use error::{ServiceError, ServiceResult};
pub use message::MessageService;
pub use typing::TypingNotifier;
pub use user::UserService;
