// ==================== STORAGE ====================
// Explicit storage boundary for the library collections.
// Records live in memory, in insertion order. Nothing is written back to disk.

use std::sync::{Arc, PoisonError, RwLock};

use crate::models::{Book, User};

/// Anything stored in a repository is identified by a string id
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> &str;
}

/// Collection operations the services rely on.
/// A persistent backend only has to implement this trait.
pub trait Repository<T: Record>: Send + Sync {
    /// Replaces the whole collection
    fn load(&self, records: Vec<T>);

    /// All records, in insertion order
    fn list(&self) -> Vec<T>;

    fn get(&self, id: &str) -> Option<T>;

    /// Appends the record unless its id is already taken. Returns `false` on duplicate.
    fn insert(&self, record: T) -> bool;

    /// Replaces the record stored under `id` in place, returning the previous value
    fn put(&self, id: &str, record: T) -> Option<T>;

    /// Rebuilds the record stored under `id` from its current value, under a single
    /// write lock, and returns the new value
    fn update(&self, id: &str, apply: Box<dyn FnOnce(&T) -> T + '_>) -> Option<T>;

    /// Removes the record stored under `id`, keeping the others in order
    fn delete(&self, id: &str) -> Option<T>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn with_records(records: Vec<T>) -> Self {
        Self { records: RwLock::new(records) }
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn load(&self, records: Vec<T>) {
        *self.records.write().unwrap_or_else(PoisonError::into_inner) = records;
    }

    fn list(&self) -> Vec<T> {
        self.records.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn get(&self, id: &str) -> Option<T> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    fn insert(&self, record: T) -> bool {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        if records.iter().any(|r| r.id() == record.id()) {
            return false;
        }
        records.push(record);
        true
    }

    fn put(&self, id: &str, record: T) -> Option<T> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let slot = records.iter_mut().find(|r| r.id() == id)?;
        Some(std::mem::replace(slot, record))
    }

    fn update(&self, id: &str, apply: Box<dyn FnOnce(&T) -> T + '_>) -> Option<T> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let slot = records.iter_mut().find(|r| r.id() == id)?;
        let next = apply(slot);
        *slot = next;
        Some(slot.clone())
    }

    fn delete(&self, id: &str) -> Option<T> {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }

    fn len(&self) -> usize {
        self.records.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// The two collections of the library, shared with every handler through `web::Data`
#[derive(Clone)]
pub struct LibraryStore {
    books: Arc<dyn Repository<Book>>,
    users: Arc<dyn Repository<User>>,
}

impl LibraryStore {
    pub fn new(books: Arc<dyn Repository<Book>>, users: Arc<dyn Repository<User>>) -> Self {
        Self { books, users }
    }

    /// In-memory store pre-filled with the given records
    pub fn in_memory(books: Vec<Book>, users: Vec<User>) -> Self {
        Self::new(
            Arc::new(InMemoryRepository::with_records(books)),
            Arc::new(InMemoryRepository::with_records(users)),
        )
    }

    pub fn books(&self) -> &dyn Repository<Book> {
        self.books.as_ref()
    }

    pub fn users(&self) -> &dyn Repository<User> {
        self.users.as_ref()
    }
}
