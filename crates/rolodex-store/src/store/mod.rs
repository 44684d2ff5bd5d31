//! The data-access contract consumed by the CardDAV layer.

mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::StoreResult;
use crate::model::{Contact, Label, RelationshipType};

/// Per-user contact storage.
///
/// Every mutation bumps the user's sync token and stamps the contact with
/// the new token value as its `version` and a fresh ETag, atomically.
pub trait ContactStore: Send + Sync {
    /// ## Errors
    /// Fails only on storage failure; an unknown UID yields `Ok(None)`.
    fn get_contact(
        &self,
        user: Uuid,
        uid: &str,
        include_deleted: bool,
    ) -> StoreResult<Option<Contact>>;

    /// Lists contacts ordered by UID. `abbreviated` omits avatar payloads.
    ///
    /// ## Errors
    /// Fails on storage failure.
    fn list_contacts(
        &self,
        user: Uuid,
        abbreviated: bool,
        include_deleted: bool,
    ) -> StoreResult<Vec<Contact>>;

    /// Contacts, tombstones included, whose version is greater than `version`.
    ///
    /// ## Errors
    /// Fails on storage failure.
    fn contacts_changed_since(&self, user: Uuid, version: i64) -> StoreResult<Vec<Contact>>;

    /// ## Errors
    /// Fails on storage failure.
    fn sync_token(&self, user: Uuid) -> StoreResult<i64>;

    /// Increments and returns the user's sync token.
    ///
    /// ## Errors
    /// Fails on storage failure.
    fn bump_sync_token(&self, user: Uuid) -> StoreResult<i64>;

    /// ## Errors
    /// Fails on storage failure.
    fn relationship_types(&self, user: Uuid) -> StoreResult<Vec<RelationshipType>>;

    /// ## Errors
    /// Fails on storage failure.
    fn labels(&self, user: Uuid) -> StoreResult<Vec<Label>>;

    /// Inserts a contact. A tombstone with the same UID is replaced.
    ///
    /// ## Errors
    /// Returns `Conflict` if a live contact with the UID exists.
    fn create_contact(&self, user: Uuid, contact: Contact) -> StoreResult<Contact>;

    /// Replaces a live contact, keeping its `id` and `uid`.
    ///
    /// ## Errors
    /// Returns `NotFound` if no live contact has the UID.
    fn update_contact(&self, user: Uuid, contact: Contact) -> StoreResult<Contact>;

    /// Soft-deletes a contact and returns the tombstone.
    ///
    /// ## Errors
    /// Returns `NotFound` if no live contact has the UID.
    fn delete_contact(&self, user: Uuid, uid: &str) -> StoreResult<Contact>;

    /// ## Errors
    /// Fails on storage failure.
    fn resolve_contact_id(&self, user: Uuid, uid: &str) -> StoreResult<Option<Uuid>>;
}
