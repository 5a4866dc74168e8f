//! End-to-end chat flows
//!
//! Run with: cargo test -p integration-tests --test chat_flow_tests

use integration_tests::{fixtures, TestApp};
use modchat_service::{
    AdminService, AuthService, ConversationService, MessageService, SendMessageRequest,
    UserService,
};

// ============================================================================
// Registration and approval
// ============================================================================

#[tokio::test]
async fn test_registration_waits_for_approval_then_unlocks_login() {
    let app = TestApp::new();
    let auth = AuthService::new(&app.ctx);

    let request = auth.register(fixtures::registration("alice")).await.unwrap();

    // not signed in, and the account does not exist yet
    assert!(auth.current_session().await.unwrap().is_none());
    let err = auth.login(fixtures::login("alice")).await.unwrap_err();
    assert_eq!(err.error_code(), "ACCOUNT_PENDING");

    let admin = app.admin().await.unwrap();
    let admins = AdminService::new(&app.ctx);
    let pending = admins.pending_requests(&admin).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, request.id);

    admins.approve(&admin, request.id).await.unwrap().unwrap();
    auth.logout().await.unwrap();

    let session = auth.login(fixtures::login("alice")).await.unwrap();
    assert_eq!(session.user.username, "alice");
    assert!(session.user.is_approved);
    assert!(!session.user.is_admin);
}

#[tokio::test]
async fn test_rejected_registration_cannot_log_in_but_can_retry() {
    let app = TestApp::new();
    let auth = AuthService::new(&app.ctx);

    let request = auth.register(fixtures::registration("bob")).await.unwrap();
    let admin = app.admin().await.unwrap();
    AdminService::new(&app.ctx)
        .reject(&admin, request.id)
        .await
        .unwrap();
    auth.logout().await.unwrap();

    let err = auth.login(fixtures::login("bob")).await.unwrap_err();
    assert_eq!(err.error_code(), "INVALID_CREDENTIALS");

    // the rejection released the username for a fresh attempt
    let retry = auth.register(fixtures::registration("bob")).await.unwrap();
    assert!(retry.is_pending());
}

#[tokio::test]
async fn test_duplicate_usernames_are_refused_across_requests_and_accounts() {
    let app = TestApp::new();
    let auth = AuthService::new(&app.ctx);

    app.onboard("alice").await.unwrap();
    let err = auth
        .register(fixtures::registration("alice"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");

    auth.register(fixtures::registration("carol")).await.unwrap();
    let err = auth
        .register(fixtures::registration("carol"))
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "CONFLICT");
}

// ============================================================================
// Conversations and messages
// ============================================================================

#[tokio::test]
async fn test_direct_conversation_round_trip() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let messages = MessageService::new(&app.ctx);

    let conv = conversations.open_direct(alice.id, bob.id).await.unwrap();
    assert_eq!(
        conversations.open_direct(bob.id, alice.id).await.unwrap().id,
        conv.id
    );

    messages
        .send(alice.id, SendMessageRequest::text(conv.id, "hi bob"))
        .await
        .unwrap();
    messages
        .send(bob.id, SendMessageRequest::text(conv.id, "hi alice"))
        .await
        .unwrap();

    let history = messages.history(conv.id).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "hi bob");
    assert_eq!(history[1].content, "hi alice");

    // the sidebar shows the conversation with the latest message
    let sidebar = conversations.list_for(alice.id).await.unwrap();
    assert_eq!(sidebar.len(), 1);
    assert_eq!(
        sidebar[0].last_message.as_ref().unwrap().content,
        "hi alice"
    );
}

#[tokio::test]
async fn test_group_conversation_with_read_state() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();
    let carol = app.onboard("carol").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let group = conversations
        .create_group(
            alice.id,
            modchat_service::CreateGroupRequest {
                name: "weekend plans".to_string(),
                participant_ids: vec![bob.id, carol.id],
            },
        )
        .await
        .unwrap();
    assert_eq!(group.participants.len(), 3);

    MessageService::new(&app.ctx)
        .send(bob.id, SendMessageRequest::text(group.id, "saturday?"))
        .await
        .unwrap();

    let updated = conversations.mark_read(group.id, alice.id).await.unwrap();
    assert_eq!(updated.unread_count, 0);

    let history = MessageService::new(&app.ctx).history(group.id).await.unwrap();
    assert!(history[0].is_read);
}

#[tokio::test]
async fn test_blocking_hides_the_direct_conversation_until_unblocked() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    conversations.open_direct(alice.id, bob.id).await.unwrap();

    let users = UserService::new(&app.ctx);
    users.block(alice.id, bob.id).await.unwrap();
    assert!(conversations.list_for(alice.id).await.unwrap().is_empty());
    assert_eq!(conversations.list_for(bob.id).await.unwrap().len(), 1);

    users.unblock(alice.id, bob.id).await.unwrap();
    assert_eq!(conversations.list_for(alice.id).await.unwrap().len(), 1);
}

// ============================================================================
// Settings and profile
// ============================================================================

#[tokio::test]
async fn test_settings_replacement_reaches_the_session() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();

    let mut settings = modchat_core::UserSettings::for_user("Alice A.");
    settings.theme = modchat_core::Theme::Dark;
    UserService::new(&app.ctx)
        .update_settings(alice.id, settings)
        .await
        .unwrap();

    let session = AuthService::new(&app.ctx)
        .current_session()
        .await
        .unwrap()
        .unwrap();
    let stored = session.user.settings.unwrap();
    assert_eq!(stored.display_name, "Alice A.");
    assert_eq!(stored.theme, modchat_core::Theme::Dark);
}

// ============================================================================
// Admin account removal
// ============================================================================

#[tokio::test]
async fn test_deleting_a_user_removes_their_footprint() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();
    let carol = app.onboard("carol").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let messages = MessageService::new(&app.ctx);

    let direct = conversations.open_direct(alice.id, bob.id).await.unwrap();
    messages
        .send(alice.id, SendMessageRequest::text(direct.id, "bye"))
        .await
        .unwrap();

    let group = conversations
        .create_group(
            carol.id,
            modchat_service::CreateGroupRequest {
                name: "trio".to_string(),
                participant_ids: vec![alice.id, bob.id],
            },
        )
        .await
        .unwrap();
    messages
        .send(alice.id, SendMessageRequest::text(group.id, "from alice"))
        .await
        .unwrap();
    messages
        .send(bob.id, SendMessageRequest::text(group.id, "from bob"))
        .await
        .unwrap();

    let admin = app.admin().await.unwrap();
    AdminService::new(&app.ctx)
        .delete_user(&admin, alice.id)
        .await
        .unwrap();

    // direct conversation and its messages are gone
    assert!(app
        .ctx
        .conversations()
        .find_by_id(direct.id)
        .await
        .unwrap()
        .is_none());
    assert!(messages.history(direct.id).await.is_err());

    // the group survives without alice or her messages
    let group_after = app
        .ctx
        .conversations()
        .find_by_id(group.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!group_after.includes(alice.id));
    let history = messages.history(group.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "from bob");

    assert!(app.ctx.users().find_by_id(alice.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_non_admin_cannot_delete_accounts() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    // silently refused
    AdminService::new(&app.ctx)
        .delete_user(&alice, bob.id)
        .await
        .unwrap();
    assert!(app.ctx.users().find_by_id(bob.id).await.unwrap().is_some());
}
