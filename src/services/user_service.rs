// ==================== USERS ====================
// Member CRUD and the per-member subscription report.

use chrono::NaiveDate;

use crate::{
    models::{CreateUserRequest, SubscriptionDetails, User, UserPatch},
    services::subscription_service,
    storage::LibraryStore,
    utils::AppError,
};

fn user_not_found() -> AppError {
    AppError::NotFound("User not found".to_string())
}

pub fn list_users(store: &LibraryStore) -> Vec<User> {
    store.users().list()
}

pub fn get_user(store: &LibraryStore, id: &str) -> Result<User, AppError> {
    store.users().get(id).ok_or_else(user_not_found)
}

/// Registers a member and returns every member
pub fn create_user(store: &LibraryStore, request: CreateUserRequest) -> Result<Vec<User>, AppError> {
    let user = User::from(request);
    let id = user.id.clone();

    if !store.users().insert(user) {
        log::warn!("⚠️ User {} already exists", id);
        return Err(AppError::AlreadyExists("User exist with this id.".to_string()));
    }

    log::info!("👤 User {} created", id);
    Ok(store.users().list())
}

/// Shallow-merges `patch` into the member and returns every member
pub fn update_user(
    store: &LibraryStore,
    id: &str,
    patch: Option<UserPatch>,
) -> Result<Vec<User>, AppError> {
    let patch = patch.unwrap_or_default();

    store
        .users()
        .update(id, Box::new(move |current: &User| current.merged(patch)))
        .ok_or_else(user_not_found)?;

    log::info!("📝 User {} updated", id);
    Ok(store.users().list())
}

/// Removes exactly one member and returns the remaining ones, order preserved
pub fn delete_user(store: &LibraryStore, id: &str) -> Result<Vec<User>, AppError> {
    store
        .users()
        .delete(id)
        .ok_or_else(|| AppError::NotFound("User to be deleted was not found".to_string()))?;

    log::info!("🗑️  User {} deleted", id);
    Ok(store.users().list())
}

pub fn subscription_details(
    store: &LibraryStore,
    id: &str,
    today: NaiveDate,
) -> Result<SubscriptionDetails, AppError> {
    let user = get_user(store, id)?;
    let status = subscription_service::evaluate_user(&user, today);
    log::debug!("🔎 User {} subscription ends on day {} (fine {})", id, status.expiration_day, status.fine);

    Ok(SubscriptionDetails {
        user,
        subscription_expired: status.subscription_expired,
        days_left_for_expiration: status.days_left_for_expiration,
        fine: status.fine,
    })
}
