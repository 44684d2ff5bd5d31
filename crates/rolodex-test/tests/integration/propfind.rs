#![allow(clippy::unused_async, unused_must_use)]
//! Tests for PROPFIND on the contacts collection and its resources.

use salvo::http::StatusCode;

use super::helpers::*;

const DAV: &str = "DAV:";
const CS: &str = "http://calendarserver.org/ns/";

/// ## Summary
/// Depth 0 describes the collection only.
#[test_log::test(tokio::test)]
async fn collection_depth_zero() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    let response = TestRequest::propfind(&card_path(TEST_USER, None))
        .depth("0")
        .xml_body(&propfind_props(&[(DAV, "resourcetype"), (DAV, "sync-token")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_header_contains("Content-Type", "application/xml")
        .assert_body_contains("<CR:addressbook/>")
        .assert_body_contains("urn:rolodex:sync:1")
        .assert_body_contains("<CR:max-resource-size>4096</CR:max-resource-size>");
    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// Depth 1 lists each live contact with its ETag but no address data.
#[test_log::test(tokio::test)]
async fn collection_depth_one_lists_members() {
    let server = TestServer::new();
    let etag = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    server
        .seed_vcard("john", &sample_vcard("john", "John Roe", "john@example.com"))
        .await;

    let response = TestRequest::propfind(&card_path(TEST_USER, None))
        .depth("1")
        .xml_body(&propfind_props(&[(DAV, "resourcetype"), (CS, "getctag")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&card_href("jane"))
        .assert_body_contains(&card_href("john"))
        .assert_getetag(&etag)
        .assert_body_contains("<CS:getctag>")
        .assert_body_not_contains("BEGIN:VCARD");
    assert_eq!(response.count_multistatus_responses(), 3);
}

/// ## Summary
/// Deleted contacts drop out of the listing.
#[test_log::test(tokio::test)]
async fn collection_listing_hides_deleted() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    TestRequest::delete(&card_path(TEST_USER, Some("jane.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);

    TestRequest::propfind(&card_path(TEST_USER, None))
        .depth("1")
        .xml_body(&propfind_props(&[(DAV, "getetag")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_not_contains(&card_href("jane"));
}

/// ## Summary
/// `resourcetype` against a `.vcf` path describes that resource.
#[test_log::test(tokio::test)]
async fn single_resource() {
    let server = TestServer::new();
    let etag = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    let response = TestRequest::propfind(&card_path(TEST_USER, Some("jane.vcf")))
        .xml_body(&propfind_props(&[(DAV, "resourcetype"), (DAV, "getetag")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains(&card_href("jane"))
        .assert_getetag(&etag)
        .assert_body_contains("text/vcard");
    assert_eq!(response.count_multistatus_responses(), 1);
}

/// ## Summary
/// An unknown resource is reported with a 404 status.
#[test_log::test(tokio::test)]
async fn single_resource_unknown() {
    let server = TestServer::new();
    TestRequest::propfind(&card_path(TEST_USER, Some("ghost.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("HTTP/1.1 404 Not Found");
}

/// ## Summary
/// Malformed XML is a client error.
#[test_log::test(tokio::test)]
async fn malformed_body_is_bad_request() {
    let server = TestServer::new();
    TestRequest::propfind(&card_path(TEST_USER, None))
        .xml_body("<D:propfind xmlns:D=\"DAV:\"><D:prop></D:propfind>")
        .send(&server.service)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
