use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use tracing::instrument;

use super::services;
use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    error::AppResult,
    recipes::{extractors::RecipeId, repo::Recipe},
    state::AppState,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/likedRecipes", get(list_liked))
        .route("/auth/likedRecipes/:id", post(add_liked))
        .route("/auth/removeLiked/:id", delete(remove_liked))
}

#[instrument(skip(state))]
pub async fn add_liked(
    State(state): State<AppState>,
    AuthUser(account_id): AuthUser,
    RecipeId(recipe_id): RecipeId,
) -> AppResult<Json<MessageResponse>> {
    services::add_favorite(
        state.favorites.as_ref(),
        state.recipes.as_ref(),
        account_id,
        recipe_id,
    )
    .await?;
    Ok(Json(MessageResponse::new("Recipe added to favorites")))
}

#[instrument(skip(state))]
pub async fn list_liked(
    State(state): State<AppState>,
    AuthUser(account_id): AuthUser,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = services::list_favorites(state.favorites.as_ref(), account_id).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn remove_liked(
    State(state): State<AppState>,
    AuthUser(account_id): AuthUser,
    RecipeId(recipe_id): RecipeId,
) -> AppResult<Json<MessageResponse>> {
    services::remove_favorite(state.favorites.as_ref(), account_id, recipe_id).await?;
    Ok(Json(MessageResponse::new("Recipe removed from favorites")))
}
