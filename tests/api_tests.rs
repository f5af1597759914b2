//! API integration tests
//!
//! These run against a live server with a clean database:
//! `cargo run`, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Create a book and return its ID
async fn create_book(client: &Client, title: &str, author: &str) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": title,
            "genre": "Fantasy",
            "author_name": author
        }))
        .send()
        .await
        .expect("Failed to send create book request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book response");
    body["id"].as_i64().expect("No book ID")
}

/// Create a reader and return their ID
async fn create_reader(client: &Client, name: &str) -> i64 {
    let response = client
        .post(format!("{}/readers", BASE_URL))
        .json(&json!({
            "name": name,
            "address": { "city": "Lyon", "street": "12 rue des Archives" }
        }))
        .send()
        .await
        .expect("Failed to send create reader request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse reader response");
    body["id"].as_i64().expect("No reader ID")
}

/// Create a loan and return its ID
async fn create_loan(client: &Client, book_id: i64, reader_id: i64) -> i64 {
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id, "reader_id": reader_id }))
        .send()
        .await
        .expect("Failed to send create loan request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse loan response");
    body["id"].as_i64().expect("No loan ID")
}

async fn delete_entity(client: &Client, path: &str, id: i64) {
    let _ = client
        .delete(format!("{}/{}/{}", BASE_URL, path, id))
        .send()
        .await;
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
async fn test_readiness_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/ready", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "ready");
}

#[tokio::test]
#[ignore]
async fn test_create_book_embeds_author() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "The Dispossessed",
            "genre": "Science Fiction",
            "author_name": "Ursula K. Le Guin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["author"]["name"], "Ursula K. Le Guin");
    assert_eq!(body["is_available"], true);

    let book_id = body["id"].as_i64().expect("No book ID");
    delete_entity(&client, "books", book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_create_book_rejects_empty_title() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "",
            "genre": "Poetry",
            "author_name": "Anonymous"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_loan_lifecycle() {
    let client = Client::new();
    let book_id = create_book(&client, "A Wizard of Earthsea", "Ursula K. Le Guin").await;
    let reader_id = create_reader(&client, "Nina Lavand").await;

    // Borrow the book
    let loan_id = create_loan(&client, book_id, reader_id).await;

    // The book is no longer available
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], false);

    // A second loan on the same book is rejected
    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id, "reader_id": reader_id }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // Return the book
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "returned");
    assert!(body["loan"]["return_date"].is_string());

    // A second return attempt fails
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 422);

    // The book is available again
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["is_available"], true);

    delete_entity(&client, "readers", reader_id).await;
    delete_entity(&client, "books", book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_loan_for_missing_reader_fails() {
    let client = Client::new();
    let book_id = create_book(&client, "Orlando", "Virginia Woolf").await;

    let response = client
        .post(format!("{}/loans", BASE_URL))
        .json(&json!({ "book_id": book_id, "reader_id": 999_999 }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    delete_entity(&client, "books", book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_deletion_guards_while_on_loan() {
    let client = Client::new();
    let book_id = create_book(&client, "The Left Hand of Darkness", "Ursula K. Le Guin").await;
    let reader_id = create_reader(&client, "Marc Ollivier").await;
    let loan_id = create_loan(&client, book_id, reader_id).await;

    // Neither the reader nor the book can be deleted while the loan is open
    let response = client
        .delete(format!("{}/readers/{}", BASE_URL, reader_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 409);

    // After the return, both deletions succeed
    let response = client
        .post(format!("{}/loans/{}/return", BASE_URL, loan_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 200);

    let response = client
        .delete(format!("{}/readers/{}", BASE_URL, reader_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);
}

#[tokio::test]
#[ignore]
async fn test_get_missing_reader_returns_404() {
    let client = Client::new();

    let response = client
        .get(format!("{}/readers/999999", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_update_reader_changes_address() {
    let client = Client::new();
    let reader_id = create_reader(&client, "Sasha Bern").await;

    let response = client
        .put(format!("{}/readers/{}", BASE_URL, reader_id))
        .json(&json!({
            "name": "Sasha Bern",
            "address": { "city": "Nantes", "street": "3 quai de Versailles" }
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["address"]["city"], "Nantes");

    delete_entity(&client, "readers", reader_id).await;
}

#[tokio::test]
#[ignore]
async fn test_available_books_listing() {
    let client = Client::new();
    let book_id = create_book(&client, "Kindred", "Octavia E. Butler").await;

    let response = client
        .get(format!("{}/books/available", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    let books = body.as_array().expect("Expected an array");
    assert!(books
        .iter()
        .any(|b| b["id"].as_i64() == Some(book_id)));

    delete_entity(&client, "books", book_id).await;
}

#[tokio::test]
#[ignore]
async fn test_reports_shapes() {
    let client = Client::new();

    let response = client
        .get(format!("{}/reports/availability", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["available_books"].is_number());

    for path in [
        "reports/reader-history",
        "reports/current-loans",
        "reports/last-visits",
        "reports/favorite-genres",
        "reports/overdue",
    ] {
        let response = client
            .get(format!("{}/{}", BASE_URL, path))
            .send()
            .await
            .expect("Failed to send request");
        assert!(response.status().is_success(), "{} failed", path);

        let body: Value = response.json().await.expect("Failed to parse response");
        assert!(body.is_array(), "{} did not return an array", path);
    }
}
