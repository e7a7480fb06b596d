//! Integration tests for the chat API endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use network_gpt::persona::PersonaCatalog;
    use serde_json::json;

    use crate::test_utils::{body_to_json, post_json, test_app, test_app_with, test_config};

    const SECURITY_HEADERS: [(&str, &str); 7] = [
        ("content-type", "application/json"),
        ("x-content-type-options", "nosniff"),
        ("x-frame-options", "DENY"),
        ("x-xss-protection", "1; mode=block"),
        ("cache-control", "no-cache, no-store, must-revalidate"),
        ("pragma", "no-cache"),
        ("expires", "0"),
    ];

    fn assert_security_headers(headers: &axum::http::HeaderMap) {
        for (name, value) in SECURITY_HEADERS {
            assert_eq!(headers.get(name).unwrap(), value, "header {}", name);
        }
    }

    async fn assert_bad_request(body: &str, error: &str) {
        let response = post_json(test_app(vec![]), "/api/chat", body.to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_security_headers(response.headers());

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body, json!({ "error": error }));
    }

    #[tokio::test]
    async fn it_rejects_malformed_json() {
        assert_bad_request("{message:", "Invalid request format").await;
        assert_bad_request("\"just a string\"", "Invalid request format").await;
    }

    #[tokio::test]
    async fn it_rejects_invalid_history() {
        assert_bad_request(
            r#"{"message": "hi", "chatHistory": {"type": "user"}}"#,
            "Invalid chat history format",
        )
        .await;
    }

    #[tokio::test]
    async fn it_rejects_invalid_media() {
        assert_bad_request(
            r#"{"message": "hi", "media": "shot.png"}"#,
            "Invalid media format",
        )
        .await;
    }

    #[tokio::test]
    async fn it_rejects_empty_message_without_media() {
        assert_bad_request(r#"{"message": "   "}"#, "Message or media is required").await;
        assert_bad_request(r#"{"message": "", "media": []}"#, "Message or media is required")
            .await;
    }

    #[tokio::test]
    async fn it_answers_offline_from_english_table() {
        let response = post_json(
            test_app(vec![]),
            "/api/chat",
            json!({ "message": "nmap -sV target" }).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_security_headers(response.headers());

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["status"], "offline");
        assert_eq!(body["provider"], "heaven-network-offline-kali");
        assert_eq!(body["language"], "english");
        assert!(body["response"].as_str().unwrap().starts_with("Nmap network scanner"));
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn it_answers_offline_in_hinglish() {
        let response = post_json(
            test_app(vec![]),
            "/api/chat",
            json!({ "message": "mera code fix kar do", "chatHistory": [] }).to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["language"], "hinglish");
        assert_eq!(body["provider"], "heaven-network-offline-hinglish");
        assert!(body["response"].as_str().unwrap().starts_with("Fix karne ke liye"));
    }

    #[tokio::test]
    async fn it_answers_english_default() {
        let response = post_json(
            test_app(vec![]),
            "/api/chat",
            json!({ "message": "what's the weather like" }).to_string(),
        )
        .await;

        let catalog = PersonaCatalog::builtin().unwrap();
        let english = &catalog.get("network-gpt").unwrap().offline.english;

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["status"], "offline");
        assert_eq!(body["language"], "english");
        assert_eq!(body["response"], english.default.as_str());
    }

    #[tokio::test]
    async fn it_accepts_media_only() {
        let response = post_json(
            test_app(vec![]),
            "/api/chat",
            json!({
                "message": "",
                "media": [{"name": "shot.png", "type": "image/png"}]
            })
            .to_string(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["status"], "offline");
        assert_eq!(body["language"], "english");
    }

    #[tokio::test]
    async fn it_accepts_loosely_shaped_media() {
        for media in [
            json!(["shot.png"]),
            json!([{"name": null, "type": "image/png"}]),
            json!([42, {"type": 7}]),
        ] {
            let response = post_json(
                test_app(vec![]),
                "/api/chat",
                json!({ "message": "", "media": &media }).to_string(),
            )
            .await;

            assert_eq!(response.status(), StatusCode::OK, "media {}", media);
            let body = body_to_json(response.into_body()).await;
            assert_eq!(body["status"], "offline");
        }
    }

    #[tokio::test]
    async fn it_truncates_long_messages() {
        let mut config = test_config();
        config.max_message_length = 10;
        let app = test_app_with(config);

        // The trigger falls beyond the cap so the default is used
        let message = format!("{}wireshark", "x".repeat(20));
        let response = post_json(app, "/api/chat", json!({ "message": message }).to_string()).await;

        let body = body_to_json(response.into_body()).await;
        assert!(!body["response"].as_str().unwrap().starts_with("Wireshark"));
    }
}
