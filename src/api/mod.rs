pub mod books;
pub mod health;
pub mod metrics;
pub mod swagger;
pub mod users;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use serde::Deserialize;

use crate::utils::AppError;

/// Body shape `{ "data": ... }` used by book creation and updates
#[derive(Debug, Deserialize)]
pub struct DataPayload<T> {
    pub data: Option<T>,
}

/// Bad JSON bodies are answered with the same 404 envelope as every other client error
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log::warn!("⚠️ Rejected body on {} {}: {}", req.method(), req.path(), err);

    let message = match &err {
        JsonPayloadError::ContentType => "No data provided".to_string(),
        JsonPayloadError::Deserialize(e) if e.is_eof() => "No data provided".to_string(),
        other => format!("Invalid data provided: {}", other),
    };

    AppError::InvalidRequest(message).into()
}

/// Library routes: `/health`, `/metrics`, `/books/*`, `/users/*`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/health", web::get().to(health::health_check))
        .route("/metrics", web::get().to(metrics::get_metrics))
        .service(
            web::scope("/books")
                .route("", web::get().to(books::get_books))
                .route("", web::post().to(books::create_book))
                .route("/issued/by-user", web::get().to(books::get_issued_books))
                .route("/issued/withFine", web::get().to(books::get_users_with_fine))
                .route("/{id}", web::get().to(books::get_book))
                .route("/{id}", web::put().to(books::update_book)),
        )
        .service(
            web::scope("/users")
                .route("", web::get().to(users::get_users))
                .route("", web::post().to(users::create_user))
                .route("/subscription-details/{id}", web::get().to(users::get_subscription_details))
                .route("/{id}", web::get().to(users::get_user))
                .route("/{id}", web::put().to(users::update_user))
                .route("/{id}", web::delete().to(users::delete_user)),
        );
}

#[cfg(test)]
pub(crate) mod test_support {
    use actix_web::{http::StatusCode, test, web, App};
    use chrono::NaiveDate;

    use crate::models::{Book, SubscriptionType, User};
    use crate::storage::LibraryStore;

    fn book(id: &str, name: &str) -> Book {
        Book {
            id: id.into(),
            name: name.into(),
            author: "Author".into(),
            genre: "Genre".into(),
            publisher: "Publisher".into(),
            price: 100.0,
        }
    }

    /// Three books, one lapsed member holding book 2, one member without a loan
    pub fn book_store() -> LibraryStore {
        LibraryStore::in_memory(
            vec![book("1", "Dune"), book("2", "Emma"), book("3", "Ulysses")],
            vec![
                User {
                    id: "u1".into(),
                    name: "Ana".into(),
                    surname: "Lima".into(),
                    email: "ana@library.dev".into(),
                    subscription_type: SubscriptionType::Basic,
                    subscription_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                    issued_book: Some("2".into()),
                    issued_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                    return_date: NaiveDate::from_ymd_opt(2020, 1, 15),
                },
                User {
                    id: "u2".into(),
                    name: "Rui".into(),
                    surname: "Costa".into(),
                    email: "rui@library.dev".into(),
                    subscription_type: SubscriptionType::Premium,
                    subscription_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                    issued_book: None,
                    issued_date: None,
                    return_date: None,
                },
            ],
        )
    }

    /// Runs one request against a fresh app and returns status plus JSON body
    pub async fn call(store: LibraryStore, req: test::TestRequest) -> (StatusCode, serde_json::Value) {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(store))
                .configure(super::configure),
        )
        .await;

        let resp = test::call_service(&app, req.to_request()).await;
        let status = resp.status();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }
}
