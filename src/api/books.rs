use actix_web::{web, HttpResponse};

use crate::{
    api::DataPayload,
    models::{ApiResponse, Book, BookPatch, ErrorResponse, IssuedBook, UserWithFine},
    services::book_service,
    storage::LibraryStore,
    utils::AppError,
};

/// GET /books - All books in the catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses(
        (status = 200, description = "Every book, in insertion order", body = [Book])
    )
)]
pub async fn get_books(store: web::Data<LibraryStore>) -> HttpResponse {
    let books = book_service::list_books(&store);
    log::info!("📚 GET /books - {} books", books.len());
    HttpResponse::Ok().json(ApiResponse::ok(books))
}

/// GET /books/{id} - Single book
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let book = book_service::get_book(&store, &path)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(book)))
}

/// GET /books/issued/by-user - Books currently lent, with the borrower
#[utoipa::path(
    get,
    path = "/books/issued/by-user",
    tag = "Books",
    responses(
        (status = 200, description = "Issued books", body = [IssuedBook]),
        (status = 404, description = "No book issued yet", body = ErrorResponse)
    )
)]
pub async fn get_issued_books(store: web::Data<LibraryStore>) -> Result<HttpResponse, AppError> {
    let issued = book_service::list_issued_books(&store)?;
    log::info!("📖 GET /books/issued/by-user - {} issued", issued.len());
    Ok(HttpResponse::Ok().json(ApiResponse::ok(issued)))
}

/// GET /books/issued/withFine - Borrowers who owe a fine today
#[utoipa::path(
    get,
    path = "/books/issued/withFine",
    tag = "Books",
    responses(
        (status = 200, description = "Users with their fine", body = [UserWithFine]),
        (status = 404, description = "No user have a fine to pay", body = ErrorResponse)
    )
)]
pub async fn get_users_with_fine(store: web::Data<LibraryStore>) -> Result<HttpResponse, AppError> {
    let today = chrono::Utc::now().date_naive();
    let fined = book_service::list_users_with_fine(&store, today)?;
    log::info!("💰 GET /books/issued/withFine - {} users", fined.len());
    Ok(HttpResponse::Ok().json(ApiResponse::ok(fined)))
}

/// POST /books - Adds a book, body `{ "data": Book }`
#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    request_body(content = Book, description = "Sent as `{ \"data\": Book }`"),
    responses(
        (status = 200, description = "Whole catalog including the new book", body = [Book]),
        (status = 404, description = "No data provided, or id already taken", body = ErrorResponse)
    )
)]
pub async fn create_book(
    store: web::Data<LibraryStore>,
    body: web::Json<DataPayload<Book>>,
) -> Result<HttpResponse, AppError> {
    let books = book_service::create_book(&store, body.into_inner().data)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(books)))
}

/// PUT /books/{id} - Shallow update, body `{ "data": Partial<Book> }`
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "Books",
    params(("id" = String, Path, description = "Book id")),
    request_body(content = BookPatch, description = "Sent as `{ \"data\": BookPatch }`"),
    responses(
        (status = 200, description = "Whole catalog with the updated book", body = [Book]),
        (status = 404, description = "Book not found with this particular id", body = ErrorResponse)
    )
)]
pub async fn update_book(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
    body: web::Json<DataPayload<BookPatch>>,
) -> Result<HttpResponse, AppError> {
    let books = book_service::update_book(&store, &path, body.into_inner().data)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(books)))
}
