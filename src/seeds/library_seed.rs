use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::models::{Book, User};
use crate::storage::{LibraryStore, Record};
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
struct BooksFile {
    books: Vec<Book>,
}

#[derive(Debug, Deserialize)]
struct UsersFile {
    users: Vec<User>,
}

async fn read_file(path: &Path) -> Result<String, AppError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| AppError::Storage(format!("Failed to read {}: {}", path.display(), e)))
}

/// Drops records whose id was already seen (first one wins)
fn dedup_by_id<T: Record>(records: Vec<T>, kind: &str) -> Vec<T> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|r| {
            let fresh = seen.insert(r.id().to_string());
            if !fresh {
                log::warn!("   ⚠️  Duplicate {} id '{}' in seed file, skipped", kind, r.id());
            }
            fresh
        })
        .collect()
}

/// Reads `{ "books": [...] }`
pub async fn load_books(path: &Path) -> Result<Vec<Book>, AppError> {
    let content = read_file(path).await?;
    let file: BooksFile = serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("Invalid books file {}: {}", path.display(), e)))?;
    Ok(dedup_by_id(file.books, "book"))
}

/// Reads `{ "users": [...] }`
pub async fn load_users(path: &Path) -> Result<Vec<User>, AppError> {
    let content = read_file(path).await?;
    let file: UsersFile = serde_json::from_str(&content)
        .map_err(|e| AppError::Storage(format!("Invalid users file {}: {}", path.display(), e)))?;
    Ok(dedup_by_id(file.users, "user"))
}

/// Fills the store from the two seed files. Any previous content is replaced.
pub async fn seed_library(store: &LibraryStore, books_path: &Path, users_path: &Path) -> Result<(), AppError> {
    log::info!("📚 Loading books from {}", books_path.display());
    let books = load_books(books_path).await?;

    log::info!("👥 Loading users from {}", users_path.display());
    let users = load_users(users_path).await?;

    log::info!("   ✅ Seeded {} books and {} users", books.len(), users.len());

    store.books().load(books);
    store.users().load(users);

    if store.books().is_empty() {
        log::warn!("   ⚠️  Book catalog is empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const BOOKS: &str = r#"{
        "books": [
            { "id": "1", "name": "Dune", "author": "Frank Herbert", "genre": "Sci-Fi", "publisher": "Chilton", "price": 250 },
            { "id": "1", "name": "Copy", "author": "Nobody", "genre": "None", "publisher": "None", "price": 1 },
            { "id": "2", "name": "Emma", "author": "Jane Austen", "genre": "Novel", "publisher": "Murray", "price": 120.5 }
        ]
    }"#;

    const USERS: &str = r#"{
        "users": [
            {
                "id": "1", "name": "Ana", "surname": "Lima", "email": "ana@library.dev",
                "subscriptionType": "Premium", "subscriptionDate": "01/15/2022",
                "issuedBook": "1", "issuedDate": "04/01/2022", "returnDate": "04/15/2022"
            },
            {
                "id": "2", "name": "Rui", "surname": "Costa", "email": "rui@library.dev",
                "subscriptionType": "Basic", "subscriptionDate": "06/01/2022"
            }
        ]
    }"#;

    #[tokio::test]
    async fn test_seed_library() {
        let books = write_temp(BOOKS);
        let users = write_temp(USERS);
        let store = LibraryStore::in_memory(Vec::new(), Vec::new());

        seed_library(&store, books.path(), users.path()).await.unwrap();

        let loaded = store.books().list();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].name, "Dune");
        assert_eq!(loaded[1].price, 120.5);
        assert_eq!(store.users().len(), 2);
        assert!(store.users().get("2").unwrap().issued_book.is_none());
    }

    #[tokio::test]
    async fn test_missing_file_is_storage_error() {
        let err = load_books(Path::new("/nonexistent/books.json")).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[tokio::test]
    async fn test_malformed_file_is_storage_error() {
        let file = write_temp(r#"{ "books": "nope" }"#);
        let err = load_books(file.path()).await.unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }
}
