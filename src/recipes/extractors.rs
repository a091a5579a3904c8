use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::AppError;

/// Recipe id taken from the `:id` path segment. A segment that is not a UUID
/// cannot name any recipe, so it rejects as 404.
#[derive(Debug, Clone, Copy)]
pub struct RecipeId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for RecipeId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map(|Path(id)| RecipeId(id))
            .map_err(|_| AppError::NotFound("Recipe not found".into()))
    }
}
