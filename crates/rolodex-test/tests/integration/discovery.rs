#![allow(clippy::unused_async, unused_must_use)]
//! Tests for service discovery: well-known redirect, OPTIONS and principal
//! lookup.

use salvo::http::StatusCode;

use super::helpers::*;

const DAV: &str = "DAV:";
const CARDDAV: &str = "urn:ietf:params:xml:ns:carddav";

/// ## Summary
/// The well-known URL redirects permanently to the `CardDAV` root.
#[test_log::test(tokio::test)]
async fn well_known_redirects() {
    let server = TestServer::new();
    TestRequest::get("/.well-known/carddav")
        .send(&server.service)
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY)
        .assert_header("Location", "/carddav/");
}

/// ## Summary
/// Well-known PROPFIND probes are redirected too.
#[test_log::test(tokio::test)]
async fn well_known_redirects_propfind() {
    let server = TestServer::new();
    TestRequest::propfind("/.well-known/carddav")
        .send(&server.service)
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);
}

/// ## Summary
/// OPTIONS advertises addressbook support and write verbs.
#[test_log::test(tokio::test)]
async fn options_advertises_carddav() {
    let server = TestServer::new();
    TestRequest::options(&card_path(TEST_USER, None))
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("DAV", "1, 2, 3, addressbook")
        .assert_header_contains("Allow", "PROPFIND")
        .assert_header_contains("Allow", "PUT")
        .assert_header_contains("Public", "REPORT");
}

/// ## Summary
/// OPTIONS needs no principal, even behind a proxy that supplied none.
#[test_log::test(tokio::test)]
async fn options_without_principal() {
    let server = TestServer::with_config(proxy_config());
    TestRequest::options("/carddav/")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header_contains("Allow", "DELETE");
}

/// ## Summary
/// A read-only principal is offered only the read verbs.
#[test_log::test(tokio::test)]
async fn options_read_only_hides_writes() {
    let server = TestServer::with_config(read_only_config());
    let response = TestRequest::options(&card_path(TEST_USER, None))
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK);
    let allow = response.get_header("Allow").expect("Allow header");
    assert!(!allow.contains("PUT"), "unexpected write verb in {allow}");
    assert!(!allow.contains("DELETE"), "unexpected write verb in {allow}");
}

/// ## Summary
/// Asking for `current-user-principal` on a collection path still yields
/// principal discovery.
#[test_log::test(tokio::test)]
async fn current_user_principal_on_collection_path() {
    let server = TestServer::new();
    TestRequest::propfind(&card_path(TEST_USER, None))
        .depth("0")
        .xml_body(&propfind_props(&[(DAV, "current-user-principal")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<D:current-user-principal>")
        .assert_body_contains(&format!("<D:href>{TEST_ORIGIN}/carddav/alice/</D:href>"))
        .assert_body_contains("<D:principal/>");
}

/// ## Summary
/// The home set points at the contacts collection.
#[test_log::test(tokio::test)]
async fn addressbook_home_set() {
    let server = TestServer::new();
    TestRequest::propfind(&principal_path(TEST_USER))
        .xml_body(&propfind_props(&[(CARDDAV, "addressbook-home-set")]))
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<CR:addressbook-home-set>")
        .assert_body_contains(&format!(
            "<D:href>{TEST_ORIGIN}/carddav/alice/contacts/</D:href>"
        ));
}

/// ## Summary
/// A bare PROPFIND on the root is answered with principal discovery.
#[test_log::test(tokio::test)]
async fn root_propfind_is_principal_discovery() {
    let server = TestServer::new();
    TestRequest::propfind("/carddav/")
        .send(&server.service)
        .await
        .assert_status(StatusCode::MULTI_STATUS)
        .assert_body_contains("<CR:addressbook-home-set>");
}
