#![allow(clippy::unused_async, unused_must_use)]
//! Tests for the sync-collection report.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// An initial sync lists everything and returns the current token.
#[test_log::test(tokio::test)]
async fn initial_sync() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    server
        .seed_vcard("john", &sample_vcard("john", "John Roe", "john@example.com"))
        .await;

    let response = TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(&sync_collection_report(""))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&card_href("jane"))
        .assert_body_contains(&card_href("john"));
    assert_eq!(response.count_multistatus_responses(), 2);
    assert_eq!(response.sync_token().as_deref(), Some("urn:rolodex:sync:2"));
}

/// ## Summary
/// A later token reports only what changed since, with deletions as 404.
#[test_log::test(tokio::test)]
async fn incremental_sync_reports_changes_and_tombstones() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    server
        .seed_vcard("john", &sample_vcard("john", "John Roe", "john@example.com"))
        .await;

    let first = TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(&sync_collection_report(""))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);
    let token = first.sync_token().expect("sync token");

    TestRequest::delete(&card_path(TEST_USER, Some("jane.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    server
        .seed_vcard("jim", &sample_vcard("jim", "Jim Poe", "jim@example.com"))
        .await;

    let response = TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(&sync_collection_report(&token))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&card_href("jane"))
        .assert_body_contains("HTTP/1.1 404 Not Found")
        .assert_body_contains(&card_href("jim"))
        .assert_body_not_contains(&card_href("john"));
    assert_eq!(response.count_multistatus_responses(), 2);
    assert_eq!(response.sync_token().as_deref(), Some("urn:rolodex:sync:4"));
}

/// ## Summary
/// Syncing at the current token reports nothing.
#[test_log::test(tokio::test)]
async fn sync_at_current_token_is_empty() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    let response = TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(&sync_collection_report("urn:rolodex:sync:1"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);
    assert_eq!(response.count_multistatus_responses(), 0);
    assert_eq!(response.sync_token().as_deref(), Some("urn:rolodex:sync:1"));
}

/// ## Summary
/// An unreadable token falls back to a full sync.
#[test_log::test(tokio::test)]
async fn garbage_token_resyncs() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    let response = TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(&sync_collection_report("not-a-token"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);
    assert_eq!(response.count_multistatus_responses(), 1);
}
