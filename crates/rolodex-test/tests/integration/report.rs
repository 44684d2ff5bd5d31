#![allow(clippy::unused_async, unused_must_use)]
//! Tests for the addressbook-multiget and addressbook-query reports.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// One valid and one unknown href yield exactly one response.
#[test_log::test(tokio::test)]
async fn multiget_skips_unknown_hrefs() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    let hrefs = vec![
        card_path(TEST_USER, Some("jane.vcf")),
        card_path(TEST_USER, Some("ghost.vcf")),
    ];
    let response = TestRequest::report(&card_path(TEST_USER, None))
        .depth("1")
        .xml_body(&addressbook_multiget_report(&hrefs))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&card_href("jane"))
        .assert_body_contains("<CR:address-data>")
        .assert_body_contains("FN:Jane Doe")
        .assert_body_not_contains("ghost");
    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// Query returns every live contact regardless of its filter.
#[test_log::test(tokio::test)]
async fn query_returns_whole_collection() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    server
        .seed_vcard("john", &sample_vcard("john", "John Roe", "john@example.com"))
        .await;

    let response = TestRequest::report(&card_path(TEST_USER, None))
        .depth("1")
        .xml_body(addressbook_query_report())
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("FN:Jane Doe")
        .assert_body_contains("FN:John Roe");
    assert_eq!(response.count_multistatus_responses(), 2);
}

/// ## Summary
/// Reports this server does not know are 501.
#[test_log::test(tokio::test)]
async fn unknown_report_not_implemented() {
    let server = TestServer::new();
    TestRequest::report(&card_path(TEST_USER, None))
        .xml_body(
            r#"<?xml version="1.0" encoding="utf-8"?>
<D:expand-property xmlns:D="DAV:">
  <D:property name="displayname"/>
</D:expand-property>"#,
        )
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_IMPLEMENTED);
}

/// ## Summary
/// A REPORT body that is not XML is a client error.
#[test_log::test(tokio::test)]
async fn empty_report_is_bad_request() {
    let server = TestServer::new();
    TestRequest::report(&card_path(TEST_USER, None))
        .xml_body("")
        .send(&server.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
