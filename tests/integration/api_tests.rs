//! HTTP integration tests against a running server

use reqwest::{redirect::Policy, Client, StatusCode};
use serde_json::Value;

const BASE_URL: &str = "http://localhost:3000";

/// Client that reports redirects instead of following them
fn client() -> Client {
    Client::builder()
        .redirect(Policy::none())
        .build()
        .expect("Failed to build client")
}

fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("No Location header")
        .to_string()
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let response = client()
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_ready() {
    let response = client()
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_index_lists_counts() {
    let response = client()
        .get(format!("{}/catalog", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("Books:"));
    assert!(html.contains("Genres:"));
}

#[tokio::test]
#[ignore]
async fn test_genre_create_is_idempotent_by_name() {
    let client = client();
    let name = "Integration Poetry";

    let first = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name)])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    let second = client
        .post(format!("{}/catalog/genre/create", BASE_URL))
        .form(&[("name", name.to_uppercase())])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), StatusCode::SEE_OTHER);

    assert_eq!(location(&first), location(&second));
}

#[tokio::test]
#[ignore]
async fn test_invalid_author_is_rerendered() {
    let response = client()
        .post(format!("{}/catalog/author/create", BASE_URL))
        .form(&[("first_name", ""), ("family_name", "Austen")])
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::OK);
    let html = response.text().await.expect("Failed to read body");
    assert!(html.contains("First name must be specified."));
    assert!(html.contains("value=\"Austen\""));
}

#[tokio::test]
#[ignore]
async fn test_missing_book_instance_is_not_found() {
    let response = client()
        .get(format!("{}/catalog/bookinstance/999999/update", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
