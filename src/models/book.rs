use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::storage::Record;
use crate::utils::serde_format::us_date;

/// Book from the catalog (as stored in `data/books.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub author: String,
    pub genre: String,
    pub publisher: String,
    pub price: f64,
}

impl Record for Book {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Partial book sent on PUT. Only the fields present are merged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BookPatch {
    pub id: Option<String>,
    pub name: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<f64>,
}

impl Book {
    /// Shallow merge: every field present in the patch replaces the current one.
    pub fn merged(&self, patch: BookPatch) -> Book {
        Book {
            id: patch.id.unwrap_or_else(|| self.id.clone()),
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            author: patch.author.unwrap_or_else(|| self.author.clone()),
            genre: patch.genre.unwrap_or_else(|| self.genre.clone()),
            publisher: patch.publisher.unwrap_or_else(|| self.publisher.clone()),
            price: patch.price.unwrap_or(self.price),
        }
    }
}

/// Book lent to a user, composed for the issued-books report.
/// The catalog record itself is never touched.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssuedBook {
    #[serde(flatten)]
    pub book: Book,
    pub issued_by: String,
    #[serde(with = "us_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "04/01/2022")]
    pub issued_date: Option<chrono::NaiveDate>,
    #[serde(with = "us_date", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, example = "04/15/2022")]
    pub return_date: Option<chrono::NaiveDate>,
}
