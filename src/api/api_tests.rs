#[cfg(test)]
mod api_router_tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::api::app_state::AppState;
    use crate::api::create_router;
    use crate::config::config::AppConfig;
    use crate::observability::AppMetrics;
    use crate::services::counselor::create_counselor_service;
    use crate::services::earnings::create_earnings_service;
    use crate::services::events::EventBus;
    use crate::services::session::{SessionStore, create_session_service};

    fn test_app() -> Router {
        let config = AppConfig::test();
        let store = Arc::new(SessionStore::new(config.counselor.max_transcript_len));
        let events = EventBus::new(config.session.event_channel_capacity);
        let metrics = Arc::new(AppMetrics::default());

        let state = AppState::new(
            config.clone(),
            store.clone(),
            create_session_service(store.clone()),
            create_counselor_service(
                store,
                events.clone(),
                metrics.clone(),
                config.counselor.clone(),
            ),
            create_earnings_service(),
            events,
            metrics,
        );
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    async fn create_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/sessions", json!({"user_name": "Maya"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_create_session_returns_201() {
        let app = test_app();
        let id = create_session(&app).await;
        assert!(!id.is_empty());
    }

    #[tokio::test]
    async fn test_get_session_returns_404_for_non_existing() {
        let app = test_app();
        let response = app
            .oneshot(get("/api/v1/sessions/non_existing"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_send_message_is_accepted_and_reply_lands() {
        let app = test_app();
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/messages", id),
                json!({"message": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = body_json(response).await;
        assert_eq!(body["reply_pending"], true);
        assert_eq!(body["emergency_active"], false);

        // 测试配置下延迟为零，稍等即可在记录中看到回复
        tokio::time::sleep(Duration::from_millis(50)).await;
        let response = app
            .oneshot(get(&format!("/api/v1/sessions/{}/messages", id)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let transcript = body_json(response).await;
        assert_eq!(transcript["total"], 2);
        assert_eq!(transcript["messages"][1]["author"], "counselor");
    }

    #[tokio::test]
    async fn test_empty_message_returns_400() {
        let app = test_app();
        let id = create_session(&app).await;

        let response = app
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/messages", id),
                json!({"message": "   "}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_crisis_message_marks_session_emergency() {
        let app = test_app();
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/messages", id),
                json!({"message": "I want to end my life"}),
            ))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["emergency_triggered"], true);
        assert_eq!(body["emergency_active"], true);

        let response = app
            .oneshot(get(&format!("/api/v1/sessions/{}", id)))
            .await
            .unwrap();
        let session = body_json(response).await;
        assert_eq!(session["emergency_mode"], "emergency");
    }

    #[tokio::test]
    async fn test_reset_clears_transcript_and_emergency() {
        let app = test_app();
        let id = create_session(&app).await;

        app.clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/messages", id),
                json!({"message": "I want to end my life"}),
            ))
            .await
            .unwrap();

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/reset", id),
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let session = body_json(response).await;
        assert_eq!(session["emergency_mode"], "normal");

        let response = app
            .oneshot(get(&format!("/api/v1/sessions/{}/messages", id)))
            .await
            .unwrap();
        let transcript = body_json(response).await;
        assert_eq!(transcript["total"], 0);
    }

    #[tokio::test]
    async fn test_message_to_closed_session_returns_409() {
        let app = test_app();
        let id = create_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri(format!("/api/v1/sessions/{}", id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .oneshot(post_json(
                &format!("/api/v1/sessions/{}/messages", id),
                json!({"message": "hello"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_earnings_record_and_summary() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(post_json(
                "/api/v1/payments",
                json!({
                    "therapist_id": "t1",
                    "client_name": "Ana",
                    "amount_cents": 9000,
                    "method": "card",
                    "session_type": "individual"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(get("/api/v1/therapists/t1/earnings"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let summary = body_json(response).await;
        assert_eq!(summary["total_cents"], 9000);
        assert_eq!(summary["by_client"][0]["percentage"], 100.0);
    }
}
