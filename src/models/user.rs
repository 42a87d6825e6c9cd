use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::Record;
use crate::utils::serde_format::{blank_string, patch_date, patch_string, us_date};

/// Subscription plan of a member, serialized as its plan name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionType {
    Basic,
    Standard,
    Premium,
    /// Any plan name we don't know about, kept verbatim (no validity days)
    Unrecognized(String),
}

impl From<String> for SubscriptionType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Basic" => SubscriptionType::Basic,
            "Standard" => SubscriptionType::Standard,
            "Premium" => SubscriptionType::Premium,
            _ => SubscriptionType::Unrecognized(name),
        }
    }
}

impl From<SubscriptionType> for String {
    fn from(plan: SubscriptionType) -> Self {
        match plan {
            SubscriptionType::Basic => "Basic".to_string(),
            SubscriptionType::Standard => "Standard".to_string(),
            SubscriptionType::Premium => "Premium".to_string(),
            SubscriptionType::Unrecognized(name) => name,
        }
    }
}

impl SubscriptionType {
    /// Validity window of the plan, in days
    pub fn validity_days(&self) -> i64 {
        match self {
            SubscriptionType::Basic => 90,
            SubscriptionType::Standard => 180,
            SubscriptionType::Premium => 365,
            SubscriptionType::Unrecognized(_) => 0,
        }
    }
}

/// Library member (as stored in `data/users.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[schema(value_type = String, example = "Premium")]
    pub subscription_type: SubscriptionType,

    #[serde(default, with = "us_date")]
    #[schema(value_type = Option<String>, example = "01/15/2022")]
    pub subscription_date: Option<NaiveDate>,

    /// Id of the book currently lent to this user
    #[serde(default, deserialize_with = "blank_string::deserialize", skip_serializing_if = "Option::is_none")]
    pub issued_book: Option<String>,

    #[serde(default, with = "us_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "04/01/2022")]
    pub issued_date: Option<NaiveDate>,

    #[serde(default, with = "us_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "04/15/2022")]
    pub return_date: Option<NaiveDate>,
}

impl Record for User {
    fn id(&self) -> &str {
        &self.id
    }
}

impl User {
    pub fn has_issued_book(&self) -> bool {
        self.issued_book.is_some()
    }

    /// Shallow merge of a PUT payload
    pub fn merged(&self, patch: UserPatch) -> User {
        User {
            id: patch.id.unwrap_or_else(|| self.id.clone()),
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            surname: patch.surname.unwrap_or_else(|| self.surname.clone()),
            email: patch.email.unwrap_or_else(|| self.email.clone()),
            subscription_type: patch
                .subscription_type
                .unwrap_or_else(|| self.subscription_type.clone()),
            subscription_date: patch.subscription_date.unwrap_or(self.subscription_date),
            issued_book: patch.issued_book.unwrap_or_else(|| self.issued_book.clone()),
            issued_date: patch.issued_date.unwrap_or(self.issued_date),
            return_date: patch.return_date.unwrap_or(self.return_date),
        }
    }
}

/// Body of POST /users (fields at the top level)
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[schema(value_type = String, example = "Premium")]
    pub subscription_type: SubscriptionType,
    #[serde(default, with = "us_date")]
    #[schema(value_type = Option<String>, example = "01/15/2022")]
    pub subscription_date: Option<NaiveDate>,
}

impl From<CreateUserRequest> for User {
    fn from(req: CreateUserRequest) -> Self {
        User {
            id: req.id,
            name: req.name,
            surname: req.surname,
            email: req.email,
            subscription_type: req.subscription_type,
            subscription_date: req.subscription_date,
            issued_book: None,
            issued_date: None,
            return_date: None,
        }
    }
}

/// Partial user sent on PUT. Optional fields can be cleared with null or "".
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
    #[schema(value_type = Option<String>, example = "Standard")]
    pub subscription_type: Option<SubscriptionType>,
    #[serde(default, deserialize_with = "patch_date::deserialize")]
    #[schema(value_type = Option<String>)]
    pub subscription_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "patch_string::deserialize")]
    #[schema(value_type = Option<String>)]
    pub issued_book: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_date::deserialize")]
    #[schema(value_type = Option<String>)]
    pub issued_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "patch_date::deserialize")]
    #[schema(value_type = Option<String>)]
    pub return_date: Option<Option<NaiveDate>>,
}

/// User owing a fine (withFine report)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserWithFine {
    #[serde(flatten)]
    pub user: User,
    pub fine: u32,
}

/// User record plus the computed subscription status
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    #[serde(flatten)]
    pub user: User,
    pub subscription_expired: bool,
    pub days_left_for_expiration: i64,
    pub fine: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "u1",
            "name": "Ana",
            "surname": "Lima",
            "email": "ana@library.dev",
            "subscriptionType": "Standard",
            "subscriptionDate": "01/15/2022",
            "issuedBook": "2",
            "issuedDate": "04/01/2022",
            "returnDate": "04/15/2022"
        }))
        .unwrap()
    }

    #[test]
    fn test_deserialize_seed_user() {
        let user = seed_user();
        assert_eq!(user.subscription_type, SubscriptionType::Standard);
        assert_eq!(user.subscription_date, NaiveDate::from_ymd_opt(2022, 1, 15));
        assert_eq!(user.issued_book.as_deref(), Some("2"));
    }

    #[test]
    fn test_blank_issued_book_means_none() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": "u2",
            "name": "Rui",
            "surname": "Costa",
            "email": "rui@library.dev",
            "subscriptionType": "Basic",
            "subscriptionDate": "06/01/2022",
            "issuedBook": "",
            "issuedDate": "",
            "returnDate": ""
        }))
        .unwrap();

        assert!(!user.has_issued_book());
        assert_eq!(user.return_date, None);
    }

    #[test]
    fn test_unknown_plan_keeps_its_name() {
        let plan: SubscriptionType = serde_json::from_str("\"Gold\"").unwrap();
        assert_eq!(plan, SubscriptionType::Unrecognized("Gold".to_string()));
        assert_eq!(plan.validity_days(), 0);
        assert_eq!(serde_json::to_string(&plan).unwrap(), "\"Gold\"");

        let known: SubscriptionType = serde_json::from_str("\"Premium\"").unwrap();
        assert_eq!(known, SubscriptionType::Premium);
        assert_eq!(serde_json::to_string(&known).unwrap(), "\"Premium\"");
    }

    #[test]
    fn test_patch_clears_issued_book() {
        let patch: UserPatch = serde_json::from_value(serde_json::json!({
            "issuedBook": "",
            "returnDate": null,
            "email": "new@library.dev"
        }))
        .unwrap();
        let merged = seed_user().merged(patch);

        assert_eq!(merged.issued_book, None);
        assert_eq!(merged.return_date, None);
        assert_eq!(merged.issued_date, NaiveDate::from_ymd_opt(2022, 4, 1));
        assert_eq!(merged.email, "new@library.dev");
    }

    #[test]
    fn test_serialize_camel_case() {
        let json = serde_json::to_value(seed_user()).unwrap();
        assert_eq!(json["subscriptionType"], "Standard");
        assert_eq!(json["subscriptionDate"], "01/15/2022");
        assert_eq!(json["issuedBook"], "2");
    }
}
