//! Contact resource retrieval, storage and deletion.

use chrono::{DateTime, Utc};

use rolodex_rfc::rfc::dav::core::PreconditionError;
use rolodex_rfc::rfc::vcard::core::names;
use rolodex_rfc::rfc::vcard::parse_single;
use rolodex_store::ContactStore;

use crate::carddav::codec::{DecodeContext, LabelBook, decode, encode_to_string};
use crate::context::RequestContext;
use crate::error::{ServiceError, ServiceResult};

/// Media types accepted on `PUT`.
const ACCEPTED_CONTENT_TYPES: &[&str] = &["text/vcard", "text/x-vcard"];

/// An encoded contact ready to be served.
#[derive(Debug, Clone)]
pub struct ObjectResponse {
    /// Unquoted entity tag.
    pub etag: String,
    pub last_modified: DateTime<Utc>,
    pub body: String,
}

/// Result of a PUT operation on a contact resource.
#[derive(Debug, Clone)]
pub struct PutObjectResult {
    /// Unquoted entity tag of the stored revision.
    pub etag: String,
    /// Whether the contact was newly created.
    pub created: bool,
}

/// Request details a PUT is validated against.
#[derive(Debug, Clone, Copy)]
pub struct PutObjectContext<'a> {
    /// Resource identifier from the path. A card must carry this UID, or
    /// none, in which case it is adopted.
    pub identifier: &'a str,
    pub content_type: Option<&'a str>,
    pub if_match: Option<&'a str>,
    pub if_none_match: Option<&'a str>,
    pub max_resource_size: usize,
}

/// Whether an `If-Match`/`If-None-Match` header value matches `etag`.
///
/// Accepts `*`, comma-separated lists, quoted and weak tags.
#[must_use]
pub fn etag_matches(header: &str, etag: &str) -> bool {
    header.split(',').any(|candidate| {
        let candidate = candidate.trim();
        let candidate = candidate.strip_prefix("W/").unwrap_or(candidate);
        candidate == "*" || candidate.trim_matches('"') == etag
    })
}

/// Encodes a stored contact for `GET`/`HEAD`.
///
/// ## Errors
/// Returns `NotFound` for unknown or deleted contacts.
#[tracing::instrument(skip(store, ctx))]
pub fn get_object(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    identifier: &str,
) -> ServiceResult<ObjectResponse> {
    let contact = store
        .get_contact(ctx.user_id, identifier, false)?
        .ok_or_else(|| ServiceError::NotFound(identifier.to_string()))?;
    let labels = LabelBook::new(store.labels(ctx.user_id)?);

    Ok(ObjectResponse {
        body: encode_to_string(&contact, &labels, ctx.is_apple),
        etag: contact.etag,
        last_modified: contact.updated_at,
    })
}

fn check_content_type(content_type: Option<&str>) -> ServiceResult<()> {
    let Some(content_type) = content_type else {
        return Ok(());
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if ACCEPTED_CONTENT_TYPES.contains(&media_type.as_str()) {
        Ok(())
    } else {
        tracing::warn!(%content_type, "Rejecting unsupported content type");
        Err(PreconditionError::SupportedAddressData.into())
    }
}

/// Validates, decodes and stores a vCard.
///
/// ## Side Effects
/// Creates or replaces the contact, bumping the collection sync token.
///
/// ## Errors
/// - `Precondition` for a wrong content type, an oversized body, an
///   undecodable card or a UID that differs from the resource name
/// - `PreconditionFailed` when `If-Match`/`If-None-Match` do not hold
/// - `NotFound` for `If-Match` against a missing contact
#[tracing::instrument(skip(store, ctx, put, body), fields(
    identifier = %put.identifier,
    body_len = body.len(),
    has_if_match = put.if_match.is_some(),
    has_if_none_match = put.if_none_match.is_some()
))]
pub fn put_object(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    put: &PutObjectContext<'_>,
    body: &[u8],
) -> ServiceResult<PutObjectResult> {
    check_content_type(put.content_type)?;

    if body.len() > put.max_resource_size {
        tracing::warn!(max = put.max_resource_size, "Rejecting oversized vCard");
        return Err(PreconditionError::MaxResourceSize(put.max_resource_size).into());
    }

    let text = std::str::from_utf8(body)
        .map_err(|e| PreconditionError::ValidAddressData(format!("not UTF-8: {e}")))?;

    let existing = store.get_contact(ctx.user_id, put.identifier, false)?;

    if let Some(inm) = put.if_none_match
        && let Some(current) = &existing
        && etag_matches(inm, &current.etag)
    {
        tracing::warn!("Precondition failed: resource already exists");
        return Err(ServiceError::PreconditionFailed(
            "resource already exists".to_string(),
        ));
    }

    if let Some(im) = put.if_match {
        let Some(current) = &existing else {
            tracing::warn!("Precondition failed: resource does not exist");
            return Err(ServiceError::NotFound(put.identifier.to_string()));
        };
        if !etag_matches(im, &current.etag) {
            tracing::warn!(expected = %current.etag, got = %im, "Precondition failed: ETag mismatch");
            return Err(ServiceError::PreconditionFailed("ETag mismatch".to_string()));
        }
    }

    let card = parse_single(text).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting unparseable vCard");
        PreconditionError::ValidAddressData(e.to_string())
    })?;
    let document_uid = card.text_of(names::UID).map(|u| u.trim().to_string());
    if let Some(uid) = &document_uid
        && uid != put.identifier
    {
        tracing::warn!(%uid, "Rejecting vCard whose UID differs from the resource name");
        return Err(PreconditionError::NoUidConflict(uid.clone()).into());
    }

    let known_contacts = store.list_contacts(ctx.user_id, true, false)?;
    let relationship_types = store.relationship_types(ctx.user_id)?;
    let labels = LabelBook::new(store.labels(ctx.user_id)?);
    let decode_ctx = DecodeContext {
        known_contacts: &known_contacts,
        relationship_types: &relationship_types,
        labels: &labels,
    };

    let mut contact = decode(&card, &decode_ctx).map_err(|e| {
        tracing::warn!(error = %e, "Rejecting undecodable vCard");
        PreconditionError::ValidAddressData(e.to_string())
    })?;
    if document_uid.is_none() {
        contact.uid = put.identifier.to_string();
    }

    let created = existing.is_none();
    let stored = if created {
        store.create_contact(ctx.user_id, contact)?
    } else {
        store.update_contact(ctx.user_id, contact)?
    };

    tracing::debug!(created, etag = %stored.etag, "Stored contact");
    Ok(PutObjectResult {
        etag: stored.etag,
        created,
    })
}

/// Soft-deletes a contact, leaving a tombstone for sync.
///
/// ## Errors
/// `NotFound` for unknown contacts, `PreconditionFailed` on `If-Match`
/// mismatch.
#[tracing::instrument(skip(store, ctx))]
pub fn delete_object(
    store: &dyn ContactStore,
    ctx: &RequestContext,
    identifier: &str,
    if_match: Option<&str>,
) -> ServiceResult<()> {
    let current = store
        .get_contact(ctx.user_id, identifier, false)?
        .ok_or_else(|| ServiceError::NotFound(identifier.to_string()))?;

    if let Some(im) = if_match
        && !etag_matches(im, &current.etag)
    {
        tracing::warn!(expected = %current.etag, got = %im, "Precondition failed: ETag mismatch");
        return Err(ServiceError::PreconditionFailed("ETag mismatch".to_string()));
    }

    store.delete_contact(ctx.user_id, identifier)?;
    Ok(())
}
