//! In-memory [`ContactStore`].

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use super::ContactStore;
use crate::error::{StoreError, StoreResult};
use crate::etag::generate_etag;
use crate::model::{Contact, Label, RelationshipType};
use crate::seed;

#[derive(Debug)]
struct UserBook {
    contacts: HashMap<String, Contact>,
    token: i64,
    labels: Vec<Label>,
    relationship_types: Vec<RelationshipType>,
}

impl UserBook {
    fn new(user: Uuid) -> Self {
        Self {
            contacts: HashMap::new(),
            token: 0,
            labels: seed::system_labels(user),
            relationship_types: seed::relationship_types(user),
        }
    }

    fn bump(&mut self) -> i64 {
        self.token += 1;
        self.token
    }

    /// Stamps `contact` with a new version and ETag and stores it.
    fn commit(&mut self, mut contact: Contact) -> Contact {
        let version = self.bump();
        contact.version = version;
        contact.etag = generate_etag(&contact.uid, version);
        contact.updated_at = Utc::now();
        self.contacts.insert(contact.uid.clone(), contact.clone());
        contact
    }

    /// Refreshes relationship display strings from the current book.
    fn resolve(&self, mut contact: Contact) -> Contact {
        for rel in &mut contact.relationships {
            if let Some(target) = self.contacts.values().find(|c| c.id == rel.contact_id) {
                rel.contact_name = target.display_name();
            }
            if let Some(kind) = self
                .relationship_types
                .iter()
                .find(|t| t.id == rel.relationship_type_id)
            {
                rel.relationship_name.clone_from(&kind.name);
            }
        }
        contact
    }

    fn live(&self, uid: &str) -> Option<&Contact> {
        self.contacts.get(uid).filter(|c| !c.is_deleted())
    }
}

/// Reference store keeping every user's book in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RwLock<HashMap<Uuid, UserBook>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, user: Uuid, f: impl FnOnce(&UserBook) -> T) -> StoreResult<T> {
        {
            let books = self.books.read()?;
            if let Some(book) = books.get(&user) {
                return Ok(f(book));
            }
        }
        self.write(user, |book| f(book))
    }

    fn write<T>(&self, user: Uuid, f: impl FnOnce(&mut UserBook) -> T) -> StoreResult<T> {
        let mut books = self.books.write()?;
        let book = books.entry(user).or_insert_with(|| {
            tracing::debug!(%user, "Seeding address book");
            UserBook::new(user)
        });
        Ok(f(book))
    }
}

impl ContactStore for MemoryStore {
    fn get_contact(
        &self,
        user: Uuid,
        uid: &str,
        include_deleted: bool,
    ) -> StoreResult<Option<Contact>> {
        self.read(user, |book| {
            book.contacts
                .get(uid)
                .filter(|c| include_deleted || !c.is_deleted())
                .cloned()
                .map(|c| book.resolve(c))
        })
    }

    fn list_contacts(
        &self,
        user: Uuid,
        abbreviated: bool,
        include_deleted: bool,
    ) -> StoreResult<Vec<Contact>> {
        self.read(user, |book| {
            let mut contacts: Vec<Contact> = book
                .contacts
                .values()
                .filter(|c| include_deleted || !c.is_deleted())
                .cloned()
                .map(|mut c| {
                    if abbreviated {
                        c.avatar = None;
                    }
                    book.resolve(c)
                })
                .collect();
            contacts.sort_by(|a, b| a.uid.cmp(&b.uid));
            contacts
        })
    }

    fn contacts_changed_since(&self, user: Uuid, version: i64) -> StoreResult<Vec<Contact>> {
        self.read(user, |book| {
            let mut contacts: Vec<Contact> = book
                .contacts
                .values()
                .filter(|c| c.version > version)
                .cloned()
                .map(|c| book.resolve(c))
                .collect();
            contacts.sort_by_key(|c| c.version);
            contacts
        })
    }

    fn sync_token(&self, user: Uuid) -> StoreResult<i64> {
        self.read(user, |book| book.token)
    }

    fn bump_sync_token(&self, user: Uuid) -> StoreResult<i64> {
        self.write(user, UserBook::bump)
    }

    fn relationship_types(&self, user: Uuid) -> StoreResult<Vec<RelationshipType>> {
        self.read(user, |book| book.relationship_types.clone())
    }

    fn labels(&self, user: Uuid) -> StoreResult<Vec<Label>> {
        self.read(user, |book| book.labels.clone())
    }

    #[tracing::instrument(skip(self, contact), fields(uid = %contact.uid))]
    fn create_contact(&self, user: Uuid, mut contact: Contact) -> StoreResult<Contact> {
        self.write(user, |book| {
            if book.live(&contact.uid).is_some() {
                return Err(StoreError::Conflict(contact.uid.clone()));
            }
            if contact.id.is_nil() {
                contact.id = Uuid::new_v4();
            }
            contact.deleted_at = None;
            let stored = book.commit(contact);
            tracing::debug!(version = stored.version, "Created contact");
            Ok(book.resolve(stored))
        })?
    }

    #[tracing::instrument(skip(self, contact), fields(uid = %contact.uid))]
    fn update_contact(&self, user: Uuid, mut contact: Contact) -> StoreResult<Contact> {
        self.write(user, |book| {
            let existing = book
                .live(&contact.uid)
                .ok_or_else(|| StoreError::NotFound(contact.uid.clone()))?;
            contact.id = existing.id;
            contact.deleted_at = None;
            let stored = book.commit(contact);
            tracing::debug!(version = stored.version, "Updated contact");
            Ok(book.resolve(stored))
        })?
    }

    #[tracing::instrument(skip(self))]
    fn delete_contact(&self, user: Uuid, uid: &str) -> StoreResult<Contact> {
        self.write(user, |book| {
            let mut tombstone = book
                .live(uid)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(uid.to_string()))?;
            tombstone.deleted_at = Some(Utc::now());
            let stored = book.commit(tombstone);
            tracing::debug!(version = stored.version, "Deleted contact");
            Ok(stored)
        })?
    }

    fn resolve_contact_id(&self, user: Uuid, uid: &str) -> StoreResult<Option<Uuid>> {
        self.read(user, |book| book.live(uid).map(|c| c.id))
    }
}
