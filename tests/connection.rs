//! Connection manager and MongoDB backend
//!
//! Tests marked `#[ignore]` need a server on localhost:27017
//! (`cargo test -- --ignored`).

use minicontacts::ops::{execute_connected, run_demo, Command, SAMPLE_EMAIL};
use minicontacts::{Config, Connection, Contact, ContactStore, Error};
use std::time::{Duration, Instant};

fn unreachable_config() -> Config {
    Config {
        // Nothing listens on port 1.
        uri: "mongodb://127.0.0.1:1/?directConnection=true".to_string(),
        timeout_ms: 500,
        ..Default::default()
    }
}

fn live_config(collection: &str) -> Config {
    Config {
        uri: std::env::var("MINICONTACTS_TEST_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
        database: "minicontacts_test".to_string(),
        collection: collection.to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_ping_unreachable_server_fails_within_bound() {
    let conn = Connection::connect(&unreachable_config()).await.unwrap();

    let start = Instant::now();
    let err = conn.ping().await.unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, Error::Connection(_)), "got {:?}", err);
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
}

#[tokio::test]
async fn test_every_operation_on_unreachable_server_is_connection_error() {
    let conn = Connection::connect(&unreachable_config()).await.unwrap();
    let store = conn.contacts();
    let contact = Contact::new("John Doe", "johndoe@example.com", "1234567890");

    // Several rounds: selection failure must win against the window every time.
    for round in 0..3 {
        let start = Instant::now();
        let results = [
            ("insert", store.insert(&contact).await.err()),
            ("find_all", store.find_all().await.err()),
            (
                "update_by_email",
                store
                    .update_by_email(&contact.email, &contact)
                    .await
                    .err(),
            ),
            ("find_by_email", store.find_by_email(&contact.email).await.err()),
            ("delete_by_email", store.delete_by_email(&contact.email).await.err()),
        ];

        for (op, err) in results {
            assert!(
                matches!(err, Some(Error::Connection(_))),
                "round {} {}: got {:?}",
                round,
                op,
                err
            );
        }
        assert!(start.elapsed() < Duration::from_secs(5), "round {}", round);
    }
}

#[tokio::test]
async fn test_failed_ping_still_releases_connection() {
    let conn = Connection::connect(&unreachable_config()).await.unwrap();
    let mut out = Vec::new();

    let err = execute_connected(conn, Command::List, &mut out)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Connection(_)), "got {:?}", err);

    let text = String::from_utf8(out).unwrap();
    assert!(!text.contains("Connected to MongoDB!"));
    assert!(text.contains("Disconnected from MongoDB!"));
}

#[tokio::test]
async fn test_bad_uri_is_config_error() {
    let config = Config {
        uri: "postgres://localhost".to_string(),
        ..Default::default()
    };
    let err = Connection::connect(&config).await.err().unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_store_namespace() {
    let conn = Connection::connect(&unreachable_config()).await.unwrap();
    assert_eq!(conn.contacts().namespace(), "testdb.contacts");
    assert_eq!(conn.contacts().timeout(), Duration::from_millis(500));
}

#[tokio::test]
#[ignore = "needs a MongoDB server"]
async fn test_live_crud_roundtrip() {
    let conn = Connection::connect(&live_config("crud_roundtrip")).await.unwrap();
    conn.ping().await.unwrap();
    let store = conn.contacts();

    let email = "live-roundtrip@example.com";
    while store.delete_by_email(email).await.unwrap() > 0 {}

    store
        .insert(&Contact::new("Live Test", email, "1111111111"))
        .await
        .unwrap();
    assert_eq!(store.find_by_email(email).await.unwrap().phone, "1111111111");

    let outcome = store
        .update_by_email(email, &Contact::new("Live Test", email, "2222222222"))
        .await
        .unwrap();
    assert_eq!(outcome.matched, 1);
    assert_eq!(outcome.modified, 1);
    assert_eq!(store.find_by_email(email).await.unwrap().phone, "2222222222");

    assert_eq!(store.delete_by_email(email).await.unwrap(), 1);
    assert!(store.find_by_email(email).await.unwrap_err().is_not_found());

    conn.disconnect().await.unwrap();
}

#[tokio::test]
#[ignore = "needs a MongoDB server"]
async fn test_live_demo() {
    let conn = Connection::connect(&live_config("demo")).await.unwrap();
    conn.ping().await.unwrap();
    let store = conn.contacts();
    while store.delete_by_email(SAMPLE_EMAIL).await.unwrap() > 0 {}

    let mut out = Vec::new();
    let report = run_demo(&store, &mut out).await.unwrap();
    assert_eq!(report.found.phone, "9876543210");
    assert!(store.find_by_email(SAMPLE_EMAIL).await.unwrap_err().is_not_found());

    conn.disconnect().await.unwrap();
}
