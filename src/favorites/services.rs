use tracing::{debug, info};
use uuid::Uuid;

use super::repo::{AddFavorite, FavoriteRepo};
use crate::{
    error::{AppError, AppResult},
    recipes::repo::{Recipe, RecipeRepo},
};

/// Marks `recipe_id` as a favorite of `account_id`. Any existing recipe may be
/// favorited, including ones owned by other accounts. Repeating the call is a
/// no-op that still succeeds.
pub async fn add_favorite(
    favorites: &dyn FavoriteRepo,
    recipes: &dyn RecipeRepo,
    account_id: Uuid,
    recipe_id: Uuid,
) -> AppResult<()> {
    if recipes.find_by_id(recipe_id).await?.is_none() {
        return Err(AppError::NotFound("Recipe not found".into()));
    }

    match favorites.add(account_id, recipe_id).await? {
        AddFavorite::Added => info!(%account_id, %recipe_id, "favorite added"),
        AddFavorite::AlreadyPresent => {
            debug!(%account_id, %recipe_id, "favorite already present")
        }
        AddFavorite::RecipeMissing => {
            return Err(AppError::NotFound("Recipe not found".into()));
        }
    }
    Ok(())
}

/// Removes the caller's own edge. Edges are keyed by the caller, so another
/// account's favorite is simply not found.
pub async fn remove_favorite(
    favorites: &dyn FavoriteRepo,
    account_id: Uuid,
    recipe_id: Uuid,
) -> AppResult<()> {
    if !favorites.remove(account_id, recipe_id).await? {
        return Err(AppError::NotFound("Recipe is not in favorites".into()));
    }
    info!(%account_id, %recipe_id, "favorite removed");
    Ok(())
}

pub async fn list_favorites(favorites: &dyn FavoriteRepo, account_id: Uuid) -> AppResult<Vec<Recipe>> {
    Ok(favorites.list_recipes(account_id).await?)
}
