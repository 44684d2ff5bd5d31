#![allow(clippy::unused_async, clippy::expect_used, dead_code)]
//! Test helpers for integration tests.
//!
//! Provides utilities for:
//! - Creating a test Salvo service over a fresh in-memory store
//! - Making HTTP requests
//! - Asserting on responses
//!
//! ## Store Isolation
//! Every [`TestServer`] owns its own `MemoryStore`, so tests can run in
//! parallel without sharing contacts.

use std::sync::Arc;

use quick_xml::escape::unescape;
use salvo::http::header::HeaderName;
use salvo::http::{Method, ReqBody, StatusCode};
use salvo::prelude::*;
use salvo::test::{RequestBuilder, ResponseExt, TestClient};
use uuid::Uuid;

use rolodex_test::app::middleware::auth::Principal;
use rolodex_test::component::config::{
    AuthConfig, AuthMethod, CardDavConfig, ConfigHandler, LoggingConfig, ProxyAuthConfig,
    ServerConfig, Settings, SingleUserAuthConfig,
};
use rolodex_test::component::store::{ContactStore, MemoryStore, StoreHandler};

pub use tracing;

/// Principal used by single-user test servers.
pub const TEST_USER: &str = "alice";

/// Origin every href in a response starts with.
pub const TEST_ORIGIN: &str = "http://localhost:5800";

/// Test configuration - static struct instead of loading from file.
#[must_use]
pub fn test_config() -> Settings {
    Settings {
        auth: AuthConfig {
            method: AuthMethod::SingleUser,
            proxy: None,
            single_user: Some(SingleUserAuthConfig {
                name: TEST_USER.to_string(),
                read_only: false,
            }),
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5800,
            serve_origin: None,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
        },
        carddav: CardDavConfig {
            display_name: "Contacts".to_string(),
            max_resource_size: 4096,
        },
    }
}

/// Single-user configuration whose principal may only read.
#[must_use]
pub fn read_only_config() -> Settings {
    let mut config = test_config();
    config.auth.single_user = Some(SingleUserAuthConfig {
        name: TEST_USER.to_string(),
        read_only: true,
    });
    config
}

/// Configuration trusting the default reverse-proxy headers.
#[must_use]
pub fn proxy_config() -> Settings {
    let mut config = test_config();
    config.auth.method = AuthMethod::Proxy;
    config.auth.proxy = Some(ProxyAuthConfig::default());
    config.auth.single_user = None;
    config
}

/// Store key of a principal name, as the auth middleware derives it.
#[must_use]
pub fn user_id(name: &str) -> Uuid {
    Principal {
        name: name.to_string(),
        read_only: false,
    }
    .user_id()
}

// ============================================================================
// Path Construction Helpers
// ============================================================================

/// Principal URL path.
///
/// ## Example
/// ```ignore
/// principal_path("alice") // => "/carddav/alice/"
/// ```
#[must_use]
pub fn principal_path(principal: &str) -> String {
    format!("/carddav/{principal}/")
}

/// Contacts collection path, or a contact resource inside it.
///
/// ## Example
/// ```ignore
/// card_path("alice", Some("jane.vcf")) // => "/carddav/alice/contacts/jane.vcf"
/// ```
#[must_use]
pub fn card_path(principal: &str, item: Option<&str>) -> String {
    match item {
        Some(item) => format!("/carddav/{principal}/contacts/{item}"),
        None => format!("/carddav/{principal}/contacts/"),
    }
}

/// Absolute href the server reports for a contact of [`TEST_USER`].
#[must_use]
pub fn card_href(uid: &str) -> String {
    format!("{TEST_ORIGIN}{}", card_path(TEST_USER, Some(&format!("{uid}.vcf"))))
}

// ============================================================================
// Service
// ============================================================================

/// A full router over a private store.
pub struct TestServer {
    pub service: Service,
    pub store: Arc<MemoryStore>,
}

impl TestServer {
    /// Server for [`TEST_USER`] with write access.
    ///
    /// ## Panics
    /// Panics if the routes cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    /// ## Panics
    /// Panics if the routes cannot be built.
    #[must_use]
    pub fn with_config(config: Settings) -> Self {
        let store = Arc::new(MemoryStore::new());
        let shared: Arc<dyn ContactStore> = store.clone();

        // Matches the router assembled in main.rs
        let router = Router::new()
            .hoop(StoreHandler { store: shared })
            .hoop(ConfigHandler { settings: config })
            .push(rolodex_test::app::api::routes().expect("API routes should be valid"));

        Self {
            service: Service::new(router),
            store,
        }
    }

    /// Stores a vCard for [`TEST_USER`] through `PUT` and returns its ETag.
    ///
    /// ## Panics
    /// Panics if the server does not answer 201.
    pub async fn seed_vcard(&self, uid: &str, vcard: &str) -> String {
        let response = TestRequest::put(&card_path(TEST_USER, Some(&format!("{uid}.vcf"))))
            .vcard_body(vcard)
            .send(&self.service)
            .await
            .assert_status(StatusCode::CREATED);
        response
            .get_etag()
            .expect("PUT should return an ETag")
            .to_string()
    }
}

// ============================================================================
// Requests
// ============================================================================

/// Test request builder for constructing HTTP requests.
pub struct TestRequest {
    method: Method,
    path: String,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
}

impl TestRequest {
    /// Creates a new test request with the given method and path.
    #[must_use]
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn options(path: &str) -> Self {
        Self::new(Method::OPTIONS, path)
    }

    #[must_use]
    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn head(path: &str) -> Self {
        Self::new(Method::HEAD, path)
    }

    #[must_use]
    pub fn put(path: &str) -> Self {
        Self::new(Method::PUT, path)
    }

    #[must_use]
    pub fn delete(path: &str) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn propfind(path: &str) -> Self {
        Self::new(Method::from_bytes(b"PROPFIND").expect("Valid method"), path)
    }

    #[must_use]
    pub fn proppatch(path: &str) -> Self {
        Self::new(
            Method::from_bytes(b"PROPPATCH").expect("Valid method"),
            path,
        )
    }

    #[must_use]
    pub fn report(path: &str) -> Self {
        Self::new(Method::from_bytes(b"REPORT").expect("Valid method"), path)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn depth(self, depth: &str) -> Self {
        self.header("Depth", depth)
    }

    #[must_use]
    pub fn if_match(self, etag: &str) -> Self {
        self.header("If-Match", etag)
    }

    #[must_use]
    pub fn if_none_match(self, etag: &str) -> Self {
        self.header("If-None-Match", etag)
    }

    #[must_use]
    pub fn user_agent(self, agent: &str) -> Self {
        self.header("User-Agent", agent)
    }

    #[must_use]
    pub fn content_type(self, content_type: &str) -> Self {
        self.header("Content-Type", content_type)
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn xml_body(self, xml: &str) -> Self {
        self.content_type("application/xml; charset=utf-8")
            .body(xml.as_bytes().to_vec())
    }

    #[must_use]
    pub fn vcard_body(self, vcard: &str) -> Self {
        self.content_type("text/vcard; charset=utf-8")
            .body(vcard.as_bytes().to_vec())
    }

    /// Sends the request to the test service and returns the response.
    pub async fn send(self, service: &Service) -> TestResponse {
        let url = format!("http://127.0.0.1:5800{}", self.path);

        let mut client = match self.method.as_str() {
            "GET" => TestClient::get(&url),
            "HEAD" => TestClient::head(&url),
            "PUT" => TestClient::put(&url),
            "DELETE" => TestClient::delete(&url),
            "OPTIONS" => TestClient::options(&url),
            // PROPFIND, REPORT and friends
            _ => RequestBuilder::new(&url, self.method.clone()),
        };

        for (name, value) in self.headers {
            if let Ok(header_name) = HeaderName::try_from(name.as_str()) {
                client = client.add_header(header_name, value, true);
            }
        }

        if let Some(body_bytes) = self.body {
            client = client.body(ReqBody::Once(body_bytes.into()));
        }

        let mut response = client.send(service).await;

        let status = response
            .status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body: Vec<u8> = response.take_bytes(None).await.unwrap_or_default().to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Represents an HTTP test response for assertions.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl TestResponse {
    #[must_use]
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {expected} but got {}:\n{}",
            self.status,
            self.body_string()
        );
        self
    }

    /// Asserts that a header exists with the expected value.
    #[must_use]
    pub fn assert_header(self, name: &str, expected: &str) -> Self {
        let value = self
            .get_header(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found in response"));
        assert_eq!(
            value, expected,
            "Header '{name}' expected '{expected}' but got '{value}'"
        );
        self
    }

    #[must_use]
    pub fn assert_header_contains(self, name: &str, expected: &str) -> Self {
        let value = self
            .get_header(name)
            .unwrap_or_else(|| panic!("Header '{name}' not found in response"));
        assert!(
            value.contains(expected),
            "Header '{name}' expected to contain '{expected}' but got '{value}'"
        );
        self
    }

    #[must_use]
    pub fn assert_body_contains(self, expected: &str) -> Self {
        let body = self.body_string();
        assert!(
            body.contains(expected),
            "Expected body to contain '{expected}' but got:\n{body}"
        );
        self
    }

    #[must_use]
    pub fn assert_body_not_contains(self, unexpected: &str) -> Self {
        let body = self.body_string();
        assert!(
            !body.contains(unexpected),
            "Expected body to NOT contain '{unexpected}' but got:\n{body}"
        );
        self
    }

    #[must_use]
    pub fn assert_body_empty(self) -> Self {
        assert!(
            self.body.is_empty(),
            "Expected empty body but got {} bytes",
            self.body.len()
        );
        self
    }

    #[must_use]
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn get_etag(&self) -> Option<&str> {
        self.get_header("ETag")
    }

    /// Unescaped values of every `<D:getetag>` element.
    #[must_use]
    pub fn getetags(&self) -> Vec<String> {
        self.body_string()
            .split("<D:getetag>")
            .skip(1)
            .filter_map(|rest| rest.split_once("</D:getetag>"))
            .map(|(value, _)| {
                unescape(value).map_or_else(|_| value.to_string(), std::borrow::Cow::into_owned)
            })
            .collect()
    }

    /// Asserts that a `<D:getetag>` carries `expected`, compared after XML
    /// unescaping.
    #[must_use]
    pub fn assert_getetag(self, expected: &str) -> Self {
        let etags = self.getetags();
        assert!(
            etags.iter().any(|e| e == expected),
            "Expected getetag '{expected}' among {etags:?}"
        );
        self
    }

    /// Counts the `<D:response>` elements in a multistatus body.
    #[must_use]
    pub fn count_multistatus_responses(&self) -> usize {
        self.body_string().matches("<D:response>").count()
    }

    /// Text of the `<D:sync-token>` element at the end of a sync report.
    #[must_use]
    pub fn sync_token(&self) -> Option<String> {
        let body = self.body_string();
        let start = body.rfind("<D:sync-token>")? + "<D:sync-token>".len();
        let end = body[start..].find("</D:sync-token>")? + start;
        Some(body[start..end].to_string())
    }
}

// ============================================================================
// Bodies
// ============================================================================

#[must_use]
pub fn sample_vcard(uid: &str, fn_name: &str, email: &str) -> String {
    format!(
        "BEGIN:VCARD\r\n\
         VERSION:4.0\r\n\
         UID:{uid}\r\n\
         FN:{fn_name}\r\n\
         N:{fn_name};;;;\r\n\
         EMAIL;TYPE=work:{email}\r\n\
         END:VCARD\r\n"
    )
}

/// A vCard 3.0 card as written by Apple Contacts.
#[must_use]
pub fn apple_vcard(uid: &str) -> String {
    format!(
        "BEGIN:VCARD\r\n\
         VERSION:3.0\r\n\
         PRODID:-//Apple Inc.//iPhone OS 17.0//EN\r\n\
         N:Appleseed;Johnny;;;\r\n\
         FN:Johnny Appleseed\r\n\
         TEL;type=CELL;type=VOICE;type=pref:+1 555 0100\r\n\
         item1.EMAIL;type=INTERNET:johnny@example.com\r\n\
         item1.X-ABLabel:_$!<Other>!$_\r\n\
         BDAY;X-APPLE-OMIT-YEAR=1604:1604-03-15\r\n\
         UID:{uid}\r\n\
         END:VCARD\r\n"
    )
}

#[must_use]
pub fn propfind_allprop() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:allprop/>
</D:propfind>"#
}

/// PROPFIND asking for the given `(namespace, local name)` properties.
#[must_use]
pub fn propfind_props(props: &[(&str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?>
<D:propfind xmlns:D="DAV:">
  <D:prop>
"#,
    );
    for (ns, name) in props {
        xml.push_str(&format!("    <X:{name} xmlns:X=\"{ns}\"/>\n"));
    }
    xml.push_str("  </D:prop>\n</D:propfind>");
    xml
}

#[must_use]
pub fn addressbook_query_report() -> &'static str {
    r#"<?xml version="1.0" encoding="utf-8"?>
<C:addressbook-query xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:carddav">
  <D:prop>
    <D:getetag/>
    <C:address-data/>
  </D:prop>
  <C:filter>
    <C:prop-filter name="FN">
      <C:text-match collation="i;unicode-casemap" match-type="contains">nobody</C:text-match>
    </C:prop-filter>
  </C:filter>
</C:addressbook-query>"#
}

#[must_use]
pub fn sync_collection_report(sync_token: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<D:sync-collection xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:carddav">
  <D:sync-token>{sync_token}</D:sync-token>
  <D:sync-level>1</D:sync-level>
  <D:prop>
    <D:getetag/>
  </D:prop>
</D:sync-collection>"#
    )
}

#[must_use]
pub fn addressbook_multiget_report(hrefs: &[String]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="utf-8"?>
<C:addressbook-multiget xmlns:D="DAV:" xmlns:C="urn:ietf:params:xml:ns:carddav">
  <D:prop>
    <D:getetag/>
    <C:address-data/>
  </D:prop>
"#,
    );
    for href in hrefs {
        xml.push_str(&format!("  <D:href>{href}</D:href>\n"));
    }
    xml.push_str("</C:addressbook-multiget>");
    xml
}
