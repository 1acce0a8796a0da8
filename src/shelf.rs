//! The collection manager. `Shelf` owns the in-memory list and keeps it in step
//! with the store: writes go to SQLite first and memory only changes once the
//! write succeeded.

use std::slice;

use log::{info, warn};

use crate::db::{delete_items_with_prefix, fetch_item_records, insert_item, Store};
use crate::error::{ShelfError, ValidationError};
use crate::models::{IdGenerator, ItemDetails, ItemKind, ReadingItem, UuidGenerator};

/// Summary of a load pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Result of a remove request. A miss is an ordinary outcome, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed(usize),
    NotFound,
}

pub struct Shelf {
    store: Store,
    items: Vec<ReadingItem>,
    ids: Box<dyn IdGenerator>,
}

impl Shelf {
    /// Build a shelf over `store` with random identities and load every stored
    /// item.
    pub fn open(store: Store) -> Result<(Self, LoadReport), ShelfError> {
        Self::with_id_generator(store, Box::new(UuidGenerator))
    }

    /// Same as [`Shelf::open`] but with a caller-supplied identity source.
    pub fn with_id_generator(
        store: Store,
        ids: Box<dyn IdGenerator>,
    ) -> Result<(Self, LoadReport), ShelfError> {
        let mut shelf = Self {
            store,
            items: Vec::new(),
            ids,
        };
        let report = shelf.load()?;
        Ok((shelf, report))
    }

    /// Replace the in-memory list with whatever the store holds. Rows with an
    /// unknown kind, a wrongly typed column or missing variant fields are
    /// logged and skipped.
    pub fn load(&mut self) -> Result<LoadReport, ShelfError> {
        let conn = self.store.connect()?;
        let records = fetch_item_records(&conn)?;

        let mut report = LoadReport::default();
        let mut items = Vec::with_capacity(records.len());
        for record in records {
            match record.and_then(ReadingItem::try_from) {
                Ok(item) => items.push(item),
                Err(err) => {
                    warn!("event=item_load module=shelf status=skip reason=\"{err}\"");
                    report.skipped += 1;
                }
            }
        }

        report.loaded = items.len();
        self.items = items;
        info!(
            "event=shelf_load module=shelf status=ok loaded={} skipped={}",
            report.loaded, report.skipped
        );
        Ok(report)
    }

    /// Create an item with a fresh identity from this shelf's generator. The
    /// item is not stored until passed to [`Shelf::add`].
    pub fn new_item(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        details: ItemDetails,
    ) -> ReadingItem {
        ReadingItem::new(self.ids.as_mut(), title, author, details)
    }

    /// Validate and persist `item`, then append it. Nothing changes in memory
    /// unless the insert succeeded.
    pub fn add(&mut self, item: ReadingItem) -> Result<(), ShelfError> {
        item.validate()?;

        let conn = self.store.connect()?;
        if let Err(err) = insert_item(&conn, &item.to_record()) {
            warn!(
                "event=item_add module=shelf status=error id={} error=\"{:#}\"",
                item.id(),
                err
            );
            return Err(err.into());
        }

        info!(
            "event=item_add module=shelf status=ok id={} kind={}",
            item.id(),
            item.kind()
        );
        self.items.push(item);
        Ok(())
    }

    /// Delete every item whose identity starts with `prefix`. More than one
    /// item can match a short prefix and all of them are removed.
    pub fn remove(&mut self, prefix: &str) -> Result<RemoveOutcome, ShelfError> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Err(ValidationError::EmptyPrefix.into());
        }

        let conn = self.store.connect()?;
        let deleted = delete_items_with_prefix(&conn, prefix)?;
        if deleted == 0 {
            info!("event=item_remove module=shelf status=not_found prefix={prefix}");
            return Ok(RemoveOutcome::NotFound);
        }

        self.items.retain(|item| !item.id().starts_with(prefix));
        info!("event=item_remove module=shelf status=ok prefix={prefix} deleted={deleted}");
        Ok(RemoveOutcome::Removed(deleted))
    }

    /// Iterate the collection in insertion order. The iterator is cheap to
    /// clone, so callers can walk it more than once.
    pub fn list_all(&self) -> slice::Iter<'_, ReadingItem> {
        self.items.iter()
    }

    /// Items whose title contains `term`, ignoring case. An empty term
    /// matches everything.
    pub fn search_by_title(&self, term: &str) -> Vec<&ReadingItem> {
        let needle = term.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.title.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn filter_by_kind(&self, kind: ItemKind) -> Vec<&ReadingItem> {
        self.items.iter().filter(|item| item.kind() == kind).collect()
    }

    /// First item whose identity starts with `prefix`.
    pub fn find(&self, prefix: &str) -> Option<&ReadingItem> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return None;
        }
        self.items.iter().find(|item| item.id().starts_with(prefix))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}
