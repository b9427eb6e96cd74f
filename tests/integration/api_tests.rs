//! API integration tests
//!
//! These run against a live server with a clean database:
//! `cargo run` in one terminal, then `cargo test -- --ignored`.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080";

/// Helper to create an author and return its id
async fn create_author(client: &Client) -> i64 {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "Fyodor",
            "last_name": "Dostoevsky",
            "birth_date": "1821-11-11"
        }))
        .send()
        .await
        .expect("Failed to create author");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse author");
    body["id"].as_i64().expect("No id in author response")
}

/// Helper to create a book with the given stock and return its id
async fn create_book(client: &Client, author_id: i64, copies: i64) -> i64 {
    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Crime and Punishment",
            "description": "A novel",
            "available_copies": copies,
            "author_id": author_id
        }))
        .send()
        .await
        .expect("Failed to create book");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse book");
    body["id"].as_i64().expect("No id in book response")
}

/// Helper to read a book's available_copies
async fn available_copies(client: &Client, book_id: i64) -> i64 {
    let response = client
        .get(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to get book");

    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse book");
    body["available_copies"].as_i64().expect("No copies field")
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
async fn test_author_crud_round_trip() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "Leo",
            "last_name": "Tolstoy",
            "birth_date": "1828-09-09"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let created: Value = response.json().await.expect("Failed to parse response");
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["first_name"], "Leo");
    assert_eq!(created["birth_date"], "1828-09-09");

    let fetched: Value = client
        .get(format!("{}/authors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get author")
        .json()
        .await
        .expect("Failed to parse author");
    assert_eq!(fetched["last_name"], "Tolstoy");

    let updated: Value = client
        .put(format!("{}/authors/{}", BASE_URL, id))
        .json(&json!({"last_name": "Tolstoy-Updated"}))
        .send()
        .await
        .expect("Failed to update author")
        .json()
        .await
        .expect("Failed to parse author");
    // Untouched fields survive a partial update
    assert_eq!(updated["first_name"], "Leo");
    assert_eq!(updated["last_name"], "Tolstoy-Updated");
    assert_eq!(updated["birth_date"], "1828-09-09");

    let deleted = client
        .delete(format!("{}/authors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to delete author");
    assert!(deleted.status().is_success());

    let gone = client
        .get(format!("{}/authors/{}", BASE_URL, id))
        .send()
        .await
        .expect("Failed to get author");
    assert_eq!(gone.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_author_validation_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "first_name": "A",
            "last_name": "B"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_author_update_clears_birth_date_on_explicit_null() {
    let client = Client::new();
    let id = create_author(&client).await;

    let updated: Value = client
        .put(format!("{}/authors/{}", BASE_URL, id))
        .json(&json!({"birth_date": null}))
        .send()
        .await
        .expect("Failed to update author")
        .json()
        .await
        .expect("Failed to parse author");

    assert!(updated["birth_date"].is_null());
    // Absent fields untouched
    assert_eq!(updated["first_name"], "Fyodor");
}

#[tokio::test]
#[ignore]
async fn test_delete_author_with_books_is_rejected() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    create_book(&client, author_id, 1).await;

    let response = client
        .delete(format!("{}/authors/{}", BASE_URL, author_id))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_create_book_with_unknown_author_is_rejected() {
    let client = Client::new();

    let response = client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Orphan Book",
            "author_id": 999_999
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_book_partial_update_leaves_other_fields() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, 5).await;

    let updated: Value = client
        .put(format!("{}/books/{}", BASE_URL, book_id))
        .json(&json!({"title": "Renamed"}))
        .send()
        .await
        .expect("Failed to update book")
        .json()
        .await
        .expect("Failed to parse book");

    assert_eq!(updated["title"], "Renamed");
    assert_eq!(updated["available_copies"], 5);
    assert_eq!(updated["author_id"], author_id);
}

#[tokio::test]
#[ignore]
async fn test_borrow_round_trip() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, 3).await;

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "reader_name": "Ivan Ivanov"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let borrow: Value = response.json().await.expect("Failed to parse borrow");
    assert_eq!(borrow["book_id"], book_id);
    assert_eq!(borrow["reader_name"], "Ivan Ivanov");
    assert!(borrow["borrow_date"].is_string());
    assert!(borrow["return_date"].is_null());

    // The copy came off the shelf
    assert_eq!(available_copies(&client, book_id).await, 2);

    let fetched: Value = client
        .get(format!("{}/borrows/{}", BASE_URL, borrow["id"].as_i64().unwrap()))
        .send()
        .await
        .expect("Failed to get borrow")
        .json()
        .await
        .expect("Failed to parse borrow");
    assert_eq!(fetched["reader_name"], "Ivan Ivanov");
}

#[tokio::test]
#[ignore]
async fn test_borrow_missing_book_is_404() {
    let client = Client::new();

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book_id": 999_999,
            "reader_name": "Ivan Ivanov"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_borrow_exhausted_book_is_rejected_without_state_change() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, 0).await;

    let response = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({
            "book_id": book_id,
            "reader_name": "Ivan Ivanov"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
    assert_eq!(available_copies(&client, book_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_double_return_is_rejected() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, 2).await;

    let borrow: Value = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"book_id": book_id, "reader_name": "Ivan Ivanov"}))
        .send()
        .await
        .expect("Failed to create borrow")
        .json()
        .await
        .expect("Failed to parse borrow");
    let borrow_id = borrow["id"].as_i64().unwrap();
    assert_eq!(available_copies(&client, book_id).await, 1);

    let first = client
        .patch(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .send()
        .await
        .expect("Failed to return");
    assert!(first.status().is_success());
    let returned: Value = first.json().await.expect("Failed to parse return");
    assert!(returned["return_date"].is_string());
    assert_eq!(available_copies(&client, book_id).await, 2);

    // Second return is an error, not a no-op, and copies stay put
    let second = client
        .patch(format!("{}/borrows/{}/return", BASE_URL, borrow_id))
        .send()
        .await
        .expect("Failed to send second return");
    assert_eq!(second.status(), 400);
    assert_eq!(available_copies(&client, book_id).await, 2);
}

#[tokio::test]
#[ignore]
async fn test_return_missing_borrow_is_404() {
    let client = Client::new();

    let response = client
        .patch(format!("{}/borrows/999999/return", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
#[ignore]
async fn test_last_copy_cycle() {
    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, 1).await;

    // Take the last copy
    let borrow: Value = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"book_id": book_id, "reader_name": "First Reader"}))
        .send()
        .await
        .expect("Failed to create borrow")
        .json()
        .await
        .expect("Failed to parse borrow");
    assert_eq!(available_copies(&client, book_id).await, 0);

    // No copies left
    let refused = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"book_id": book_id, "reader_name": "Second Reader"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(refused.status(), 400);

    // Return restores availability
    let returned = client
        .patch(format!(
            "{}/borrows/{}/return",
            BASE_URL,
            borrow["id"].as_i64().unwrap()
        ))
        .send()
        .await
        .expect("Failed to return");
    assert!(returned.status().is_success());
    assert_eq!(available_copies(&client, book_id).await, 1);

    // And the book can go out again
    let again = client
        .post(format!("{}/borrows", BASE_URL))
        .json(&json!({"book_id": book_id, "reader_name": "Second Reader"}))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(again.status(), 201);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_borrows_never_oversell() {
    const READERS: usize = 6;
    const COPIES: i64 = 2;

    let client = Client::new();
    let author_id = create_author(&client).await;
    let book_id = create_book(&client, author_id, COPIES).await;

    let mut handles = Vec::new();
    for i in 0..READERS {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .post(format!("{}/borrows", BASE_URL))
                .json(&json!({
                    "book_id": book_id,
                    "reader_name": format!("Reader {}", i)
                }))
                .send()
                .await
                .expect("Failed to send request")
                .status()
                .as_u16()
        }));
    }

    let mut created: i64 = 0;
    let mut refused: i64 = 0;
    for handle in handles {
        match handle.await.expect("Task panicked") {
            201 => created += 1,
            400 => refused += 1,
            other => panic!("Unexpected status: {}", other),
        }
    }

    assert_eq!(created, COPIES);
    assert_eq!(refused, READERS as i64 - COPIES);
    assert_eq!(available_copies(&client, book_id).await, 0);
}

#[tokio::test]
#[ignore]
async fn test_list_pagination() {
    let client = Client::new();
    for _ in 0..3 {
        create_author(&client).await;
    }

    let response = client
        .get(format!("{}/authors?skip=0&limit=2", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());
    let authors: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(authors.as_array().map(Vec::len), Some(2));
}
