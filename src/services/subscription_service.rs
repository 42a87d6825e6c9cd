// ==================== SUBSCRIPTION & FINES ====================
// Expiration and fine computation shared by the subscription-details
// report and the users-with-fine report.
// Dates are compared as whole days since the Unix epoch (UTC).

use chrono::NaiveDate;

use crate::models::{SubscriptionType, User};

/// Fine for an overdue book while the subscription is still valid
pub const OVERDUE_FINE: u32 = 100;

/// Fine for an overdue book once the subscription has lapsed
pub const EXPIRED_OVERDUE_FINE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionStatus {
    /// Day number (since epoch) on which the subscription ends
    pub expiration_day: i64,
    pub subscription_expired: bool,
    pub days_left_for_expiration: i64,
    pub fine: u32,
}

/// Day count since 1970-01-01, i.e. `floor(epoch_millis / 86_400_000)` for UTC dates
pub fn day_number(date: NaiveDate) -> i64 {
    date.signed_duration_since(NaiveDate::default()).num_days()
}

/// Computes the subscription state of a member on `today`.
///
/// A missing `subscription_date` defaults to `today`. Without a `return_date`
/// nothing is due, so no fine applies. A loan is already overdue on its
/// return day itself, not only from the day after.
pub fn evaluate(
    plan: &SubscriptionType,
    subscription_date: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
    today: NaiveDate,
) -> SubscriptionStatus {
    let current_day = day_number(today);
    let subscription_day = day_number(subscription_date.unwrap_or(today));
    let expiration_day = subscription_day + plan.validity_days();

    let overdue = return_date.is_some_and(|d| day_number(d) <= current_day);
    let fine = if overdue {
        if expiration_day <= current_day {
            EXPIRED_OVERDUE_FINE
        } else {
            OVERDUE_FINE
        }
    } else {
        0
    };

    SubscriptionStatus {
        expiration_day,
        subscription_expired: expiration_day < current_day,
        days_left_for_expiration: (expiration_day - current_day).max(0),
        fine,
    }
}

/// Same as [`evaluate`], reading plan and dates from the user record
pub fn evaluate_user(user: &User, today: NaiveDate) -> SubscriptionStatus {
    evaluate(&user.subscription_type, user.subscription_date, user.return_date, today)
}
