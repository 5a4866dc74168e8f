//! Service context - dependency container for services
//!
//! Holds the gateway, the typed stores built on it, and the other shared
//! dependencies services need.

use std::sync::Arc;

use modchat_common::{AdminConfig, AppConfig};
use modchat_core::gateway::Gateway;
use modchat_core::{Snowflake, SnowflakeGenerator};
use modchat_store::{
    ConversationStore, MessageStore, RegistrationStore, SessionStore, UserStore,
};

use super::typing::TypingNotifier;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - The persistence gateway and the typed stores over it
/// - Snowflake generator for ID generation
/// - The admin sentinel credential
/// - The shared typing-timer state
#[derive(Clone)]
pub struct ServiceContext {
    gateway: Arc<dyn Gateway>,

    // Typed stores
    users: UserStore,
    messages: MessageStore,
    conversations: ConversationStore,
    requests: RegistrationStore,
    session: SessionStore,

    // Shared state
    typing: TypingNotifier,
    snowflake_generator: Arc<SnowflakeGenerator>,
    admin: AdminConfig,
}

impl ServiceContext {
    /// Create a new service context over a gateway
    pub fn new(gateway: Arc<dyn Gateway>, config: &AppConfig) -> Self {
        let conversations = ConversationStore::new(gateway.clone());
        let typing = TypingNotifier::new(conversations.clone(), config.typing.timeout_ms);

        Self {
            users: UserStore::new(gateway.clone()),
            messages: MessageStore::new(gateway.clone()),
            conversations,
            requests: RegistrationStore::new(gateway.clone()),
            session: SessionStore::new(gateway.clone()),
            typing,
            snowflake_generator: Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)),
            admin: config.admin.clone(),
            gateway,
        }
    }

    // === Gateway ===

    /// Get the raw persistence gateway
    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    // === Typed stores ===

    /// Get the user store
    pub fn users(&self) -> &UserStore {
        &self.users
    }

    /// Get the message store
    pub fn messages(&self) -> &MessageStore {
        &self.messages
    }

    /// Get the conversation store
    pub fn conversations(&self) -> &ConversationStore {
        &self.conversations
    }

    /// Get the registration request store
    pub fn requests(&self) -> &RegistrationStore {
        &self.requests
    }

    /// Get the session store
    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    // === Shared state ===

    /// Get the typing notifier
    pub fn typing(&self) -> &TypingNotifier {
        &self.typing
    }

    /// Get the admin sentinel credential
    pub fn admin(&self) -> &AdminConfig {
        &self.admin
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("gateway", &"Arc<dyn Gateway>")
            .field("stores", &"...")
            .field("admin", &self.admin.username)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modchat_store::MemoryStore;

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let ctx = ServiceContext::new(Arc::new(MemoryStore::new()), &AppConfig::default());
        let a = ctx.generate_id();
        let b = ctx.generate_id();
        assert_ne!(a, b);
    }
}
