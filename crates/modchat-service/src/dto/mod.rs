//! Data transfer objects for service inputs and outputs
//!
//! Request DTOs carry validation rules; response DTOs serialize the shapes
//! the UI layer renders.

pub mod requests;
pub mod responses;

pub use requests::{CreateGroupRequest, LoginRequest, RegisterRequest, SendMessageRequest};
pub use responses::{Delivery, SentMessage};
