use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::storage::LibraryStore;

static REQUEST_COUNT: AtomicU64 = AtomicU64::new(0);
static ERROR_COUNT: AtomicU64 = AtomicU64::new(0);

pub fn increment_request_count() {
    REQUEST_COUNT.fetch_add(1, Ordering::Relaxed);
}

pub fn increment_error_count() {
    ERROR_COUNT.fetch_add(1, Ordering::Relaxed);
}

#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct MetricsResponse {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub library_books_total: usize,
    pub library_users_total: usize,
    pub library_issued_books_total: usize,
}

impl MetricsResponse {
    pub fn collect(store: &LibraryStore) -> Self {
        MetricsResponse {
            http_requests_total: REQUEST_COUNT.load(Ordering::Relaxed),
            http_errors_total: ERROR_COUNT.load(Ordering::Relaxed),
            library_books_total: store.books().len(),
            library_users_total: store.users().len(),
            library_issued_books_total: store
                .users()
                .list()
                .iter()
                .filter(|u| u.has_issued_book())
                .count(),
        }
    }

    /// Prometheus text exposition format
    pub fn render(&self) -> String {
        format!(
            "# HELP http_requests_total Total number of HTTP requests\n\
             # TYPE http_requests_total counter\n\
             http_requests_total {}\n\
             \n\
             # HELP http_errors_total Total number of HTTP errors\n\
             # TYPE http_errors_total counter\n\
             http_errors_total {}\n\
             \n\
             # HELP library_books_total Books in the catalog\n\
             # TYPE library_books_total gauge\n\
             library_books_total {}\n\
             \n\
             # HELP library_users_total Registered members\n\
             # TYPE library_users_total gauge\n\
             library_users_total {}\n\
             \n\
             # HELP library_issued_books_total Members currently holding a book\n\
             # TYPE library_issued_books_total gauge\n\
             library_issued_books_total {}\n",
            self.http_requests_total,
            self.http_errors_total,
            self.library_books_total,
            self.library_users_total,
            self.library_issued_books_total,
        )
    }
}

#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Health",
    responses(
        (status = 200, description = "System metrics (Prometheus text format)", body = MetricsResponse)
    )
)]
pub async fn get_metrics(store: web::Data<LibraryStore>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(MetricsResponse::collect(&store).render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::book_store;

    #[test]
    fn test_render_library_gauges() {
        let text = MetricsResponse::collect(&book_store()).render();

        assert!(text.contains("library_books_total 3\n"));
        assert!(text.contains("library_users_total 2\n"));
        assert!(text.contains("library_issued_books_total 1\n"));
    }
}
