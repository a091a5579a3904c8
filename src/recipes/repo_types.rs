use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Recipe record as stored and as returned to clients.
///
/// The id goes over the wire as `_id`, which is what the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String, // newline-delimited steps
    pub image_url: String,
    #[serde(rename = "owner")]
    pub owner_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Validated, owner-agnostic recipe content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeFields {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub image_url: String,
}

impl Recipe {
    /// Case-insensitive substring match over title, ingredients and instructions.
    /// `needle` must already be lower-cased; an empty needle matches everything.
    pub fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self
                .ingredients
                .iter()
                .any(|i| i.to_lowercase().contains(needle))
            || self.instructions.to_lowercase().contains(needle)
    }
}
