#![allow(clippy::unused_async, unused_must_use)]
//! Tests for principal resolution and read-only enforcement.

use salvo::http::StatusCode;

use super::helpers::*;

/// ## Summary
/// Read-only principals cannot write; the reduced method set is returned.
#[test_log::test(tokio::test)]
async fn read_only_rejects_writes() {
    let server = TestServer::with_config(read_only_config());

    let response = TestRequest::put(&card_path(TEST_USER, Some("jane.vcf")))
        .vcard_body(&sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_header_contains("Allow", "PROPFIND");
    let allow = response.get_header("Allow").expect("Allow header");
    assert!(!allow.contains("PUT"));

    TestRequest::delete(&card_path(TEST_USER, Some("jane.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
    TestRequest::proppatch(&card_path(TEST_USER, None))
        .send(&server.service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED)
        .assert_header("Allow", "OPTIONS, GET, HEAD, PROPFIND, REPORT");
}

/// ## Summary
/// Read-only principals can still read.
#[test_log::test(tokio::test)]
async fn read_only_allows_reads() {
    let server = TestServer::with_config(read_only_config());
    TestRequest::propfind(&card_path(TEST_USER, None))
        .depth("1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS);
}

/// ## Summary
/// Behind a proxy, a request without the user header is 401.
#[test_log::test(tokio::test)]
async fn proxy_requires_user_header() {
    let server = TestServer::with_config(proxy_config());
    TestRequest::propfind(&principal_path("bob"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

/// ## Summary
/// Proxy principals get their own address books.
#[test_log::test(tokio::test)]
async fn proxy_users_are_isolated() {
    let server = TestServer::with_config(proxy_config());

    TestRequest::put("/carddav/bob/contacts/jane.vcf")
        .header("X-Remote-User", "bob")
        .vcard_body(&sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::get("/carddav/carol/contacts/jane.vcf")
        .header("X-Remote-User", "carol")
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    TestRequest::get("/carddav/bob/contacts/jane.vcf")
        .header("X-Remote-User", "bob")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
}

/// ## Summary
/// The proxy read-only header downgrades the principal.
#[test_log::test(tokio::test)]
async fn proxy_read_only_header() {
    let server = TestServer::with_config(proxy_config());
    TestRequest::delete("/carddav/bob/contacts/jane.vcf")
        .header("X-Remote-User", "bob")
        .header("X-Remote-Read-Only", "1")
        .send(&server.service)
        .await
        .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}

/// ## Summary
/// MKCOL is not supported: the address book is fixed.
#[test_log::test(tokio::test)]
async fn mkcol_not_allowed() {
    let server = TestServer::new();
    TestRequest::new(
        salvo::http::Method::from_bytes(b"MKCOL").expect("Valid method"),
        "/carddav/alice/other/",
    )
    .send(&server.service)
    .await
    .assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
