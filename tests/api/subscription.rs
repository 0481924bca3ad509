use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helper::spawn_app;

#[tokio::test]
async fn subscribe_returns_200_for_valid_data() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#;
    let response = app.post_subscriptions(body).await;

    assert_eq!(200, response.status().as_u16());
    let payload: Value = response.json().await.unwrap();
    assert_eq!(payload["status"], "created");
    assert_eq!(payload["email"], "ada@example.com");
}

#[tokio::test]
async fn subscribe_normalizes_the_email() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Ada Lovelace", "email": "Ada@Example.COM"}"#;
    let response = app.post_subscriptions(body).await;

    assert_eq!(200, response.status().as_u16());
    let payload: Value = response.json().await.unwrap();
    assert_eq!(payload["email"], "ada@example.com");
}

#[tokio::test]
async fn subscribe_returns_a_422_when_data_is_missing() {
    let app = spawn_app().await;
    let test_cases = [
        (r#"{"name": "Ada Lovelace"}"#, "missing the email"),
        (r#"{"email": "ada@example.com"}"#, "missing the name"),
        ("{}", "missing both name and email"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = app.post_subscriptions(invalid_body).await;

        assert_eq!(
            422,
            response.status().as_u16(),
            "The API did not fail with 422 when the payload was {}",
            error_message
        )
    }
}

#[tokio::test]
async fn subscribe_returns_a_400_when_fields_are_present_but_invalid() {
    let app = spawn_app().await;
    let test_cases = vec![
        (r#"{"name": "", "email": "ada@example.com"}"#, "empty name"),
        (
            r#"{"name": "A", "email": "ada@example.com"}"#,
            "single character name",
        ),
        (r#"{"name": "Ada Lovelace", "email": ""}"#, "empty email"),
        (
            r#"{"name": "Ada Lovelace", "email": "definitely-not-an-email"}"#,
            "invalid email",
        ),
    ];

    for (body, description) in test_cases {
        let response = app.post_subscriptions(body).await;
        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not return a 400 Bad Request when the payload was {}.",
            description
        );
    }
}

#[tokio::test]
async fn subscribing_twice_returns_a_409_and_sends_a_single_welcome_email() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#;
    let first = app.post_subscriptions(body).await;
    assert_eq!(200, first.status().as_u16());

    let second = app.post_subscriptions(body).await;
    assert_eq!(409, second.status().as_u16());
}

#[tokio::test]
async fn the_welcome_email_contains_an_unsubscribe_link() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#;
    app.post_subscriptions(body).await;

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let link = app.unsubscribe_link(email_request);

    assert_eq!(link.path(), "/subscriptions/unsubscribe");
    assert!(!app.unsubscribe_token(email_request).is_empty());
}

#[tokio::test]
async fn subscribe_succeeds_even_if_the_welcome_email_cannot_be_delivered() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Ada Lovelace", "email": "ada@example.com"}"#;
    let response = app.post_subscriptions(body).await;

    assert_eq!(200, response.status().as_u16());
}
