// ==================== BOOKS ====================
// Catalog lookups plus the reports joining books and users.

use chrono::NaiveDate;

use crate::{
    models::{Book, BookPatch, IssuedBook, UserWithFine},
    services::subscription_service,
    storage::LibraryStore,
    utils::AppError,
};

pub fn list_books(store: &LibraryStore) -> Vec<Book> {
    store.books().list()
}

pub fn get_book(store: &LibraryStore, id: &str) -> Result<Book, AppError> {
    store
        .books()
        .get(id)
        .ok_or_else(|| AppError::NotFound("book not found".to_string()))
}

/// Adds a book to the catalog and returns the whole catalog.
/// The collection is left untouched when the id is already taken.
pub fn create_book(store: &LibraryStore, data: Option<Book>) -> Result<Vec<Book>, AppError> {
    let book = data.ok_or_else(|| AppError::InvalidRequest("No data provided".to_string()))?;
    let id = book.id.clone();

    if !store.books().insert(book) {
        log::warn!("⚠️ Book {} already exists", id);
        return Err(AppError::AlreadyExists(
            "Book already exist with this id, please use a unique id".to_string(),
        ));
    }

    log::info!("📗 Book {} created", id);
    Ok(store.books().list())
}

/// Shallow-merges `patch` into the book and returns the whole catalog
pub fn update_book(
    store: &LibraryStore,
    id: &str,
    patch: Option<BookPatch>,
) -> Result<Vec<Book>, AppError> {
    let patch = patch.unwrap_or_default();

    store
        .books()
        .update(id, Box::new(move |current: &Book| current.merged(patch)))
        .ok_or_else(|| AppError::NotFound("Book not found with this particular id".to_string()))?;

    log::info!("📝 Book {} updated", id);
    Ok(store.books().list())
}

/// Books currently lent, one entry per borrowing user
pub fn list_issued_books(store: &LibraryStore) -> Result<Vec<IssuedBook>, AppError> {
    let books = store.books().list();

    let issued: Vec<IssuedBook> = store
        .users()
        .list()
        .into_iter()
        .filter_map(|user| {
            let book_id = user.issued_book.as_deref()?;
            match books.iter().find(|b| b.id == book_id) {
                Some(book) => Some(IssuedBook {
                    book: book.clone(),
                    issued_by: user.id.clone(),
                    issued_date: user.issued_date,
                    return_date: user.return_date,
                }),
                None => {
                    log::warn!("⚠️ User {} references unknown book {}", user.id, book_id);
                    None
                }
            }
        })
        .collect();

    if issued.is_empty() {
        return Err(AppError::NotFound("No book issued yet".to_string()));
    }

    Ok(issued)
}

/// Users holding a book who owe a fine on `today`
pub fn list_users_with_fine(
    store: &LibraryStore,
    today: NaiveDate,
) -> Result<Vec<UserWithFine>, AppError> {
    let with_fine: Vec<UserWithFine> = store
        .users()
        .list()
        .into_iter()
        .filter(|user| user.has_issued_book())
        .filter_map(|user| {
            let fine = subscription_service::evaluate_user(&user, today).fine;
            (fine > 0).then_some(UserWithFine { user, fine })
        })
        .collect();

    if with_fine.is_empty() {
        return Err(AppError::NotFound("No user have a fine to pay".to_string()));
    }

    Ok(with_fine)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubscriptionType, User};

    fn book(id: &str, name: &str) -> Book {
        Book {
            id: id.into(),
            name: name.into(),
            author: "Author".into(),
            genre: "Fiction".into(),
            publisher: "Publisher".into(),
            price: 100.0,
        }
    }

    fn user(id: &str, issued: Option<&str>, return_date: Option<NaiveDate>) -> User {
        User {
            id: id.into(),
            name: "Name".into(),
            surname: "Surname".into(),
            email: format!("{}@library.dev", id),
            subscription_type: SubscriptionType::Standard,
            subscription_date: NaiveDate::from_ymd_opt(2022, 1, 1),
            issued_book: issued.map(String::from),
            issued_date: NaiveDate::from_ymd_opt(2022, 2, 1),
            return_date,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap()
    }

    fn store() -> LibraryStore {
        LibraryStore::in_memory(
            vec![book("1", "Dune"), book("2", "Emma"), book("3", "Ulysses")],
            vec![
                user("u1", Some("2"), NaiveDate::from_ymd_opt(2022, 2, 15)),
                user("u2", None, None),
                user("u3", Some("3"), NaiveDate::from_ymd_opt(2022, 4, 1)),
            ],
        )
    }

    #[test]
    fn test_get_book() {
        let store = store();
        for id in ["1", "2", "3"] {
            assert_eq!(get_book(&store, id).unwrap().id, id);
        }
        assert_eq!(
            get_book(&store, "42"),
            Err(AppError::NotFound("book not found".to_string()))
        );
    }

    #[test]
    fn test_create_book_appends() {
        let store = store();
        let all = create_book(&store, Some(book("4", "Ivanhoe"))).unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(all[3].name, "Ivanhoe");
        assert_eq!(list_books(&store).len(), 4);
    }

    #[test]
    fn test_create_duplicate_book_is_rejected() {
        let store = store();
        let err = create_book(&store, Some(book("1", "Other"))).unwrap_err();

        assert!(matches!(err, AppError::AlreadyExists(_)));
        assert_eq!(list_books(&store), vec![book("1", "Dune"), book("2", "Emma"), book("3", "Ulysses")]);
    }

    #[test]
    fn test_create_book_without_data() {
        let err = create_book(&store(), None).unwrap_err();
        assert_eq!(err.message(), "No data provided");
    }

    #[test]
    fn test_update_book_merges() {
        let store = store();
        let patch = BookPatch { price: Some(180.0), ..Default::default() };
        let all = update_book(&store, "2", Some(patch)).unwrap();

        assert_eq!(all[1].price, 180.0);
        assert_eq!(all[1].name, "Emma");
        assert!(update_book(&store, "9", None).is_err());
    }

    #[test]
    fn test_issued_books_do_not_touch_catalog() {
        let store = store();
        let issued = list_issued_books(&store).unwrap();

        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0].book.id, "2");
        assert_eq!(issued[0].issued_by, "u1");
        assert_eq!(issued[1].issued_by, "u3");

        // the canonical record carries no loan data
        let raw = serde_json::to_value(get_book(&store, "2").unwrap()).unwrap();
        assert!(raw.get("issuedBy").is_none());
    }

    #[test]
    fn test_issued_books_skips_unknown_book() {
        let store = LibraryStore::in_memory(vec![book("1", "Dune")], vec![user("u1", Some("77"), None)]);
        assert_eq!(
            list_issued_books(&store).unwrap_err().message(),
            "No book issued yet"
        );
    }

    #[test]
    fn test_users_with_fine() {
        let store = store();
        let fined = list_users_with_fine(&store, today()).unwrap();

        assert_eq!(fined.len(), 1);
        assert_eq!(fined[0].user.id, "u1");
        assert_eq!(fined[0].fine, subscription_service::OVERDUE_FINE);
    }

    #[test]
    fn test_no_user_with_fine() {
        let early = NaiveDate::from_ymd_opt(2022, 2, 2).unwrap();
        let err = list_users_with_fine(&store(), early).unwrap_err();
        assert_eq!(err.message(), "No user have a fine to pay");
    }
}
