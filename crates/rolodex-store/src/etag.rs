//! Entity tag generation.

use sha2::{Digest, Sha256};

/// Generates the opaque (unquoted) entity tag of a contact revision.
///
/// The tag is the hex SHA-256 of `uid:version`, so it changes whenever the
/// contact's version does.
#[must_use]
pub fn generate_etag(uid: &str, version: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(uid.as_bytes());
    hasher.update(b":");
    hasher.update(version.to_string().as_bytes());
    hex::encode(hasher.finalize())
}
