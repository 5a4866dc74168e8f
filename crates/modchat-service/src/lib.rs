//! # modchat-service
//!
//! Application layer containing business logic, services, and DTOs.
//!
//! Services are cheap per-call views over a shared [`ServiceContext`]:
//!
//! ```rust,ignore
//! let ctx = ServiceContext::new(gateway, &config);
//! let session = AuthService::new(&ctx).login(request).await?;
//! ```

pub mod dto;
pub mod services;

pub use dto::{
    CreateGroupRequest, Delivery, LoginRequest, RegisterRequest, SendMessageRequest, SentMessage,
};
pub use services::{
    AdminService, AuthService, ConversationService, MessageService, ServiceContext, ServiceError,
    ServiceResult, TypingNotifier, UserService,
};
