//! Storage degradation, persistence, and live-feed behaviour
//!
//! Run with: cargo test -p integration-tests --test resilience_tests

use std::time::Duration;

use integration_tests::TestApp;
use modchat_core::gateway::Collection;
use modchat_service::{
    AuthService, ConversationService, Delivery, MessageService, SendMessageRequest,
};

// ============================================================================
// Fallback delivery
// ============================================================================

#[tokio::test]
async fn test_messages_survive_an_unreachable_primary() {
    let app = TestApp::degraded();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conv = ConversationService::new(&app.ctx)
        .open_direct(alice.id, bob.id)
        .await
        .unwrap();

    let sent = MessageService::new(&app.ctx)
        .send(alice.id, SendMessageRequest::text(conv.id, "still here"))
        .await
        .unwrap();
    assert_eq!(sent.delivery, Delivery::SavedLocally);

    // nothing was dropped: the history reads back through the fallback
    let history = MessageService::new(&app.ctx).history(conv.id).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "still here");
}

#[tokio::test]
async fn test_healthy_store_reports_confirmed_delivery() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conv = ConversationService::new(&app.ctx)
        .open_direct(alice.id, bob.id)
        .await
        .unwrap();
    let sent = MessageService::new(&app.ctx)
        .send(alice.id, SendMessageRequest::text(conv.id, "hello"))
        .await
        .unwrap();
    assert_eq!(sent.delivery, Delivery::Confirmed);
}

// ============================================================================
// File-store persistence
// ============================================================================

#[tokio::test]
async fn test_state_survives_reopening_the_file_store() {
    let dir = tempfile::tempdir().unwrap();

    let conv_id;
    let alice_id;
    {
        let app = TestApp::with_data_dir(dir.path());
        let alice = app.onboard("alice").await.unwrap();
        let bob = app.onboard("bob").await.unwrap();
        alice_id = alice.id;

        let conv = ConversationService::new(&app.ctx)
            .open_direct(alice.id, bob.id)
            .await
            .unwrap();
        conv_id = conv.id;
        MessageService::new(&app.ctx)
            .send(alice.id, SendMessageRequest::text(conv.id, "persist me"))
            .await
            .unwrap();
    }

    // a brand new app over the same directory sees everything
    let reopened = TestApp::with_data_dir(dir.path());
    let history = MessageService::new(&reopened.ctx)
        .history(conv_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content, "persist me");

    let session = AuthService::new(&reopened.ctx)
        .current_session()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.user.username, "bob");

    let sidebar = ConversationService::new(&reopened.ctx)
        .list_for(alice_id)
        .await
        .unwrap();
    assert_eq!(sidebar.len(), 1);
}

// ============================================================================
// Change feeds
// ============================================================================

#[tokio::test]
async fn test_message_feed_delivers_sends_and_skips_other_collections() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conv = ConversationService::new(&app.ctx)
        .open_direct(alice.id, bob.id)
        .await
        .unwrap();

    let mut feed = MessageService::new(&app.ctx).watch();
    let sent = MessageService::new(&app.ctx)
        .send(alice.id, SendMessageRequest::text(conv.id, "live"))
        .await
        .unwrap();

    let event = feed.recv().await.unwrap();
    assert_eq!(event.collection, Collection::Messages);
    assert_eq!(event.key, sent.message.id.to_string());
    assert!(!event.is_removal());
}

#[tokio::test]
async fn test_conversation_feed_sees_activity_updates() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let conv = conversations.open_direct(alice.id, bob.id).await.unwrap();

    let mut feed = conversations.watch();
    MessageService::new(&app.ctx)
        .send(alice.id, SendMessageRequest::text(conv.id, "ping"))
        .await
        .unwrap();

    let event = feed.recv().await.unwrap();
    assert_eq!(event.collection, Collection::Conversations);
    assert_eq!(event.key, conv.id.to_string());
    let last = event
        .value
        .get("lastMessage")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str());
    assert_eq!(last, Some("ping"));
}

// ============================================================================
// Typing indicator
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_typing_indicator_debounce_across_the_service_layer() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let conv = conversations.open_direct(alice.id, bob.id).await.unwrap();

    conversations.typing_started(conv.id).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;
    conversations.typing_started(conv.id).await.unwrap();
    tokio::time::sleep(Duration::from_millis(2500)).await;

    // 5s in, but each keystroke restarted the 3s countdown
    let current = app
        .ctx
        .conversations()
        .find_by_id(conv.id)
        .await
        .unwrap()
        .unwrap();
    assert!(current.typing);

    tokio::time::sleep(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;
    let current = app
        .ctx
        .conversations()
        .find_by_id(conv.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!current.typing);
}

#[tokio::test]
async fn test_sending_a_message_clears_typing() {
    let app = TestApp::new();
    let alice = app.onboard("alice").await.unwrap();
    let bob = app.onboard("bob").await.unwrap();

    let conversations = ConversationService::new(&app.ctx);
    let conv = conversations.open_direct(alice.id, bob.id).await.unwrap();

    conversations.typing_started(conv.id).await.unwrap();
    MessageService::new(&app.ctx)
        .send(alice.id, SendMessageRequest::text(conv.id, "done typing"))
        .await
        .unwrap();

    let current = app
        .ctx
        .conversations()
        .find_by_id(conv.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!current.typing);
}
