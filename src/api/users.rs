use actix_web::{web, HttpResponse};

use crate::{
    api::DataPayload,
    models::{ApiResponse, CreateUserRequest, ErrorResponse, SubscriptionDetails, User, UserPatch},
    services::user_service,
    storage::LibraryStore,
    utils::AppError,
};

/// GET /users - All members
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "Every member, in insertion order", body = [User])
    )
)]
pub async fn get_users(store: web::Data<LibraryStore>) -> HttpResponse {
    let users = user_service::list_users(&store);
    log::info!("👥 GET /users - {} users", users.len());
    HttpResponse::Ok().json(ApiResponse::ok(users))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service::get_user(&store, &path)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(user)))
}

/// POST /users - Registers a member (fields at the top level of the body)
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Every member including the new one", body = [User]),
        (status = 404, description = "User exist with this id.", body = ErrorResponse)
    )
)]
pub async fn create_user(
    store: web::Data<LibraryStore>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("📝 POST /users - Creating user {}", body.id);
    let users = user_service::create_user(&store, body.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// PUT /users/{id} - Shallow update, body `{ "data": Partial<User> }`
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    request_body(content = UserPatch, description = "Sent as `{ \"data\": UserPatch }`"),
    responses(
        (status = 200, description = "Every member with the updated one", body = [User]),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn update_user(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
    body: web::Json<DataPayload<UserPatch>>,
) -> Result<HttpResponse, AppError> {
    let users = user_service::update_user(&store, &path, body.into_inner().data)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// DELETE /users/{id} - Answers 202 with the remaining members
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 202, description = "Remaining members", body = [User]),
        (status = 404, description = "User to be deleted was not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("🗑️  DELETE /users/{}", path);
    let users = user_service::delete_user(&store, &path)?;
    Ok(HttpResponse::Accepted().json(ApiResponse::ok(users)))
}

/// GET /users/subscription-details/{id} - Expiration and fine of a member
#[utoipa::path(
    get,
    path = "/users/subscription-details/{id}",
    tag = "Users",
    params(("id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "User with subscription status", body = SubscriptionDetails),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_subscription_details(
    store: web::Data<LibraryStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let today = chrono::Utc::now().date_naive();
    let details = user_service::subscription_details(&store, &path, today)?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(details)))
}
