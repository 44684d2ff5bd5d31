#![allow(clippy::unused_async, unused_must_use)]
//! Tests for PUT, GET, HEAD and DELETE on contact resources.

use salvo::http::StatusCode;

use super::helpers::*;
use rolodex_test::component::store::ContactStore;

/// ## Summary
/// PUT creates, a second PUT updates, and each answers with a fresh ETag.
#[test_log::test(tokio::test)]
async fn put_creates_then_updates() {
    let server = TestServer::new();
    let path = card_path(TEST_USER, Some("jane.vcf"));

    let created = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    assert!(created.starts_with('"') && created.ends_with('"'));

    let response = TestRequest::put(&path)
        .vcard_body(&sample_vcard("jane", "Jane Smith", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    let updated = response.get_etag().expect("ETag on update");
    assert_ne!(created, updated);
}

/// ## Summary
/// A card whose UID differs from the resource name is refused and nothing is
/// stored under either name.
#[test_log::test(tokio::test)]
async fn put_rejects_uid_other_than_resource_name() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("random-file-name.vcf")))
        .vcard_body(&sample_vcard("client-uid-123", "Jane Doe", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_contains("no-uid-conflict");

    for name in ["random-file-name", "client-uid-123"] {
        assert!(
            server
                .store
                .get_contact(user_id(TEST_USER), name, true)
                .expect("store read")
                .is_none()
        );
    }
}

/// ## Summary
/// A card without a UID is stored under the resource name.
#[test_log::test(tokio::test)]
async fn put_without_uid_adopts_resource_name() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("from-path.vcf")))
        .vcard_body("BEGIN:VCARD\r\nVERSION:3.0\r\nFN:Jane Doe\r\nN:Doe;Jane;;;\r\nEND:VCARD\r\n")
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::get(&card_path(TEST_USER, Some("from-path.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("UID:from-path\r\n")
        .assert_body_contains("FN:Jane Doe");
}

/// ## Summary
/// GET returns the encoded vCard with ETag and Last-Modified.
#[test_log::test(tokio::test)]
async fn get_returns_vcard() {
    let server = TestServer::new();
    let etag = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    TestRequest::get(&card_path(TEST_USER, Some("jane.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("ETag", &etag)
        .assert_header_contains("Content-Type", "text/vcard")
        .assert_header_contains("Last-Modified", "GMT")
        .assert_body_contains("BEGIN:VCARD")
        .assert_body_contains("UID:jane")
        .assert_body_contains("FN:Jane Doe")
        .assert_body_contains("EMAIL;TYPE=work:jane@example.com");
}

/// ## Summary
/// HEAD carries the same headers as GET and no body.
#[test_log::test(tokio::test)]
async fn head_has_no_body() {
    let server = TestServer::new();
    let etag = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    TestRequest::head(&card_path(TEST_USER, Some("jane.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_header("ETag", &etag)
        .assert_body_empty();
}

/// ## Summary
/// GET on an unknown contact is 404.
#[test_log::test(tokio::test)]
async fn get_unknown_is_not_found() {
    let server = TestServer::new();
    TestRequest::get(&card_path(TEST_USER, Some("ghost.vcf")))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// Apple clients get the Apple dialect back: omitted years and wrapped labels.
#[test_log::test(tokio::test)]
async fn apple_client_round_trip() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("johnny.vcf")))
        .user_agent("iOS/17.0 (21A329) dataaccessd/1.0")
        .vcard_body(&apple_vcard("johnny"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::CREATED);

    TestRequest::get(&card_path(TEST_USER, Some("johnny.vcf")))
        .user_agent("macOS/14.0 (23A344) AddressBookCore/2487")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("X-APPLE-OMIT-YEAR=1604")
        .assert_body_contains("1604-03-15")
        .assert_body_contains("TYPE=pref");

    TestRequest::get(&card_path(TEST_USER, Some("johnny.vcf")))
        .user_agent("DAVx5/4.3")
        .send(&server.service)
        .await
        .assert_status(StatusCode::OK)
        .assert_body_contains("BDAY:--0315")
        .assert_body_not_contains("X-APPLE-OMIT-YEAR");
}

/// ## Summary
/// A non-vCard content type fails the `supported-address-data` precondition.
#[test_log::test(tokio::test)]
async fn put_wrong_content_type() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("jane.vcf")))
        .content_type("application/json")
        .body(sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_contains("supported-address-data");
}

/// ## Summary
/// Bodies over `max_resource_size` fail the `max-resource-size` precondition.
#[test_log::test(tokio::test)]
async fn put_oversized() {
    let server = TestServer::new();
    let note = "x".repeat(5000);
    let card = format!(
        "BEGIN:VCARD\r\nVERSION:4.0\r\nUID:big\r\nFN:Big\r\nNICKNAME:{note}\r\nEND:VCARD\r\n"
    );
    TestRequest::put(&card_path(TEST_USER, Some("big.vcf")))
        .vcard_body(&card)
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_contains("max-resource-size");
}

/// ## Summary
/// An undecodable card fails the `valid-address-data` precondition.
#[test_log::test(tokio::test)]
async fn put_invalid_vcard() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("bad.vcf")))
        .vcard_body("BEGIN:VCARD\r\nVERSION:4.0\r\nFN:No End\r\n")
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_contains("valid-address-data");
}

/// ## Summary
/// A photo whose type cannot be determined rejects the whole card.
#[test_log::test(tokio::test)]
async fn put_bad_photo() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("pic.vcf")))
        .vcard_body(
            "BEGIN:VCARD\r\nVERSION:3.0\r\nUID:pic\r\nFN:Pic\r\nPHOTO;ENCODING=b:iVBORw0KGgo=\r\nEND:VCARD\r\n",
        )
        .send(&server.service)
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .assert_body_contains("valid-address-data");
}

/// ## Summary
/// `If-None-Match: *` refuses to overwrite an existing contact.
#[test_log::test(tokio::test)]
async fn put_if_none_match_existing() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    TestRequest::put(&card_path(TEST_USER, Some("jane.vcf")))
        .if_none_match("*")
        .vcard_body(&sample_vcard("jane", "Jane Smith", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);
}

/// ## Summary
/// `If-Match` must name the current ETag.
#[test_log::test(tokio::test)]
async fn put_if_match() {
    let server = TestServer::new();
    let etag = server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    let path = card_path(TEST_USER, Some("jane.vcf"));

    TestRequest::put(&path)
        .if_match("\"stale\"")
        .vcard_body(&sample_vcard("jane", "Jane Smith", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);

    TestRequest::put(&path)
        .if_match(&etag)
        .vcard_body(&sample_vcard("jane", "Jane Smith", "jane@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
}

/// ## Summary
/// `If-Match` against a missing contact is 404.
#[test_log::test(tokio::test)]
async fn put_if_match_missing() {
    let server = TestServer::new();
    TestRequest::put(&card_path(TEST_USER, Some("ghost.vcf")))
        .if_match("\"anything\"")
        .vcard_body(&sample_vcard("ghost", "Ghost", "ghost@example.com"))
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// DELETE removes the contact; a second DELETE is 404.
#[test_log::test(tokio::test)]
async fn delete_contact() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;
    let path = card_path(TEST_USER, Some("jane.vcf"));

    TestRequest::delete(&path)
        .send(&server.service)
        .await
        .assert_status(StatusCode::NO_CONTENT);
    TestRequest::get(&path)
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
    TestRequest::delete(&path)
        .send(&server.service)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

/// ## Summary
/// DELETE honors `If-Match`.
#[test_log::test(tokio::test)]
async fn delete_if_match_mismatch() {
    let server = TestServer::new();
    server
        .seed_vcard("jane", &sample_vcard("jane", "Jane Doe", "jane@example.com"))
        .await;

    TestRequest::delete(&card_path(TEST_USER, Some("jane.vcf")))
        .if_match("\"stale\"")
        .send(&server.service)
        .await
        .assert_status(StatusCode::PRECONDITION_FAILED);
}
