//! Counselor flow integration tests
//!
//! Exercises the full message pipeline against the in-memory stack:
//! classification priority, emergency-mode stickiness, reply delivery
//! and reset semantics.

use std::sync::Arc;
use std::time::Duration;

use solace::brain::{
    CRISIS_RESPONSE, FALLBACK_RESPONSES, Intent, classify, generate_response,
};
use solace::config::config::AppConfig;
use solace::models::message::Author;
use solace::models::session::ChatSession;
use solace::observability::AppMetrics;
use solace::services::counselor::{CounselorService, create_counselor_service};
use solace::services::events::EventBus;
use solace::services::session::SessionStore;

fn test_stack() -> (Arc<SessionStore>, Box<dyn CounselorService>) {
    let config = AppConfig::test();
    let store = Arc::new(SessionStore::new(config.counselor.max_transcript_len));
    let service = create_counselor_service(
        store.clone(),
        EventBus::new(config.session.event_channel_capacity),
        Arc::new(AppMetrics::default()),
        config.counselor,
    );
    (store, service)
}

async fn new_session(store: &SessionStore, user_name: Option<&str>) -> String {
    let session = ChatSession::new(user_name);
    let id = session.id.clone();
    store.insert(session);
    id
}

async fn wait_for_reply(store: &SessionStore, id: &str, expected_len: usize) -> Vec<String> {
    for _ in 0..100 {
        let transcript = store.transcript(id).unwrap_or_default();
        if transcript.len() >= expected_len {
            return transcript.into_iter().map(|m| m.text).collect();
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("reply never delivered for session {}", id);
}

#[tokio::test]
async fn crisis_outranks_every_other_signal() {
    // hopeless + crisis phrasing in one message must yield the crisis reply
    assert_eq!(classify("I feel hopeless and want to die"), Intent::Emergency);
    assert_eq!(
        generate_response("I feel hopeless and want to die", None),
        CRISIS_RESPONSE
    );
}

#[tokio::test]
async fn crisis_reply_names_the_lifeline() {
    assert!(CRISIS_RESPONSE.contains("National Suicide Prevention Lifeline"));
    assert!(CRISIS_RESPONSE.contains("988"));
}

#[tokio::test]
async fn classified_messages_answer_deterministically() {
    let first = generate_response("I've been feeling anxious lately", None);
    for _ in 0..20 {
        assert_eq!(
            generate_response("I've been feeling anxious lately", None),
            first
        );
    }
}

#[tokio::test]
async fn unclassified_messages_stay_inside_the_fallback_pool() {
    for _ in 0..50 {
        let reply = generate_response("the weather is quite variable", None);
        assert!(FALLBACK_RESPONSES.contains(&reply.as_str()));
    }
}

#[tokio::test]
async fn negated_cues_do_not_classify() {
    assert_eq!(classify("my empty stomach is growling"), Intent::Unclassified);
    assert_eq!(classify("I'm not afraid of it"), Intent::Unclassified);
}

#[tokio::test]
async fn reply_is_delivered_after_typing_delay() {
    let (store, service) = test_stack();
    let id = new_session(&store, Some("Maya")).await;

    service.handle_message(&id, "hello").await.unwrap();

    let texts = wait_for_reply(&store, &id, 2).await;
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[1], generate_response("hello", Some("Maya")));
}

#[tokio::test]
async fn emergency_mode_sticks_until_reset() {
    let (store, service) = test_stack();
    let id = new_session(&store, None).await;

    let receipt = service.handle_message(&id, "I want to kill myself").await.unwrap();
    assert!(receipt.emergency_triggered);

    let receipt = service.handle_message(&id, "thanks for listening").await.unwrap();
    assert!(!receipt.emergency_triggered);
    assert!(receipt.emergency_active);

    store.reset(&id).unwrap();
    assert!(!store.get(&id).unwrap().is_emergency());

    // A fresh conversation starts from normal mode and can trigger again
    let receipt = service.handle_message(&id, "I want to kill myself").await.unwrap();
    assert!(receipt.emergency_triggered);
}

#[tokio::test]
async fn rapid_messages_each_get_their_own_reply() {
    let (store, service) = test_stack();
    let id = new_session(&store, None).await;

    service.handle_message(&id, "hello").await.unwrap();
    service.handle_message(&id, "tell me about therapy").await.unwrap();
    service.handle_message(&id, "thank you").await.unwrap();

    let texts = wait_for_reply(&store, &id, 6).await;
    let replies = store
        .transcript(&id)
        .unwrap()
        .into_iter()
        .filter(|m| m.author == Author::Counselor)
        .count();
    assert_eq!(replies, 3);
    assert_eq!(texts.len(), 6);
}

#[tokio::test]
async fn reset_drops_scheduled_replies() {
    let config = {
        let mut c = AppConfig::test();
        c.counselor.typing_delay_min_ms = 5_000;
        c.counselor.typing_delay_max_ms = 5_000;
        c
    };
    let store = Arc::new(SessionStore::new(config.counselor.max_transcript_len));
    let service = create_counselor_service(
        store.clone(),
        EventBus::new(16),
        Arc::new(AppMetrics::default()),
        config.counselor,
    );
    let id = new_session(&store, None).await;

    service.handle_message(&id, "hello").await.unwrap();
    store.reset(&id).unwrap();

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(store.transcript(&id).unwrap().is_empty());
}
