//! API integration tests against a running server

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:4000";

/// Codes must be unique, so each run uses fresh ones
fn unique_code(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
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
async fn test_list_books() {
    let client = Client::new();

    let response = client
        .get(format!("{}/books", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_array());
}

#[tokio::test]
#[ignore]
async fn test_create_get_update_delete_book() {
    let client = Client::new();
    let code = unique_code("turing");
    let title = format!("The New Turing Omnibus {}", code);

    // Create book
    let response = client
        .post(format!("{}/book", BASE_URL))
        .json(&json!({
            "code": code,
            "title": title,
            "author": "Alexander K. Dewdney"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["id"].is_string());

    // Get it back by title
    let response = client
        .get(format!("{}/book/{}", BASE_URL, title))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["code"], code.as_str());

    // Update author
    let response = client
        .patch(format!("{}/book/{}", BASE_URL, title))
        .json(&json!({ "author": "A. K. Dewdney" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"], "A. K. Dewdney");

    // Delete book
    let response = client
        .delete(format!("{}/book/{}", BASE_URL, title))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let response = client
        .get(format!("{}/book/{}", BASE_URL, title))
        .send()
        .await
        .expect("Failed to send request");

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body.is_null());
}

#[tokio::test]
#[ignore]
async fn test_create_duplicate_code() {
    let client = Client::new();
    let code = unique_code("dup");
    let title = format!("Duplicate {}", code);

    let book = json!({
        "code": code,
        "title": title,
        "author": "Someone"
    });

    let first = client
        .post(format!("{}/book", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(first.status(), 201);

    let second = client
        .post(format!("{}/book", BASE_URL))
        .json(&book)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(second.status(), 500);
    assert_eq!(second.text().await.expect("Failed to read body"), "Book not created");

    // Cleanup
    let _ = client
        .delete(format!("{}/book/{}", BASE_URL, title))
        .send()
        .await;
}

#[tokio::test]
#[ignore]
async fn test_update_unknown_title() {
    let client = Client::new();

    let response = client
        .patch(format!("{}/book/{}", BASE_URL, unique_code("missing")))
        .json(&json!({ "author": "Nobody" }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
    assert_eq!(response.text().await.expect("Failed to read body"), "Book not found");
}
