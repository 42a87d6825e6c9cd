use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Library Service API",
        version = "1.0.0",
        description = "Books and members of a small lending library.\n\n**Envelope:** every response is `{ success, data?, message? }`. Client errors (unknown id, duplicate id, missing payload) are answered with 404.\n\n**Features:**\n- Book catalog and member CRUD\n- Issued-books report\n- Subscription expiration and overdue fines\n- Health monitoring and metrics"
    ),
    paths(
        // Books
        crate::api::books::get_books,
        crate::api::books::get_book,
        crate::api::books::get_issued_books,
        crate::api::books::get_users_with_fine,
        crate::api::books::create_book,
        crate::api::books::update_book,

        // Users
        crate::api::users::get_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::get_subscription_details,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::BookPatch,
            crate::models::IssuedBook,
            crate::models::User,
            crate::models::UserPatch,
            crate::models::CreateUserRequest,
            crate::models::UserWithFine,
            crate::models::SubscriptionDetails,
            crate::models::ErrorResponse,
            crate::api::health::HealthResponse,
            crate::api::metrics::MetricsResponse,
        )
    ),
    tags(
        (name = "Books", description = "Book catalog, issued books and overdue fines."),
        (name = "Users", description = "Library members and their subscription status."),
        (name = "Health", description = "Health check and system metrics endpoints for monitoring service status."),
    )
)]
pub struct ApiDoc;
