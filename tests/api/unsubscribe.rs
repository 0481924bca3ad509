use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helper::spawn_app;

#[tokio::test]
async fn unsubscribing_with_a_valid_token_deactivates_the_subscriber() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_subscriptions(r#"{"name": "Jane Doe", "email": "jane@example.com"}"#)
        .await;
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let link = app.unsubscribe_link(email_request);

    let response = reqwest::get(link).await.unwrap();

    assert_eq!(200, response.status().as_u16());
    let payload: Value = response.json().await.unwrap();
    assert_eq!(payload["status"], "unsubscribed");
    assert_eq!(payload["name"], "Jane Doe");
    assert_eq!(payload["email"], "jane@example.com");
}

#[tokio::test]
async fn repeating_an_unsubscribe_returns_a_404() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.email_server)
        .await;

    app.post_subscriptions(r#"{"name": "Jane Doe", "email": "jane@example.com"}"#)
        .await;
    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let token = app.unsubscribe_token(email_request);

    let first = app.get_unsubscribe(&token).await;
    assert_eq!(200, first.status().as_u16());

    let second = app.get_unsubscribe(&token).await;
    assert_eq!(404, second.status().as_u16());
}

#[tokio::test]
async fn unsubscribing_with_an_unknown_token_returns_a_404() {
    let app = spawn_app().await;

    let response = app.get_unsubscribe("definitely-not-an-issued-token").await;

    assert_eq!(404, response.status().as_u16());
}

#[tokio::test]
async fn unsubscribing_without_a_token_is_rejected() {
    let app = spawn_app().await;

    let missing = reqwest::get(format!("{}/subscriptions/unsubscribe", app.addr))
        .await
        .unwrap();
    assert_eq!(400, missing.status().as_u16());

    let empty = app.get_unsubscribe("").await;
    assert_eq!(400, empty.status().as_u16());
}

#[tokio::test]
async fn resubscribing_after_an_unsubscribe_reactivates_the_subscription() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&app.email_server)
        .await;

    let body = r#"{"name": "Jane Doe", "email": "jane@example.com"}"#;
    let first = app.post_subscriptions(body).await;
    let first: Value = first.json().await.unwrap();
    assert_eq!(first["status"], "created");

    let email_request = &app.email_server.received_requests().await.unwrap()[0];
    let token = app.unsubscribe_token(email_request);
    assert_eq!(200, app.get_unsubscribe(&token).await.status().as_u16());

    let again = app.post_subscriptions(body).await;
    assert_eq!(200, again.status().as_u16());
    let again: Value = again.json().await.unwrap();
    assert_eq!(again["status"], "reactivated");

    // The token survives the inactive period, so it can be consumed again.
    assert_eq!(200, app.get_unsubscribe(&token).await.status().as_u16());
}
