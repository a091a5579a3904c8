use tracing::info;
use uuid::Uuid;

use super::{
    dto::RecipeRequest,
    repo::{Recipe, RecipeFields, RecipeRepo},
};
use crate::{
    auth::{repo::AccountRepo, services::current_account},
    error::{AppError, AppResult},
    policy::authorize,
};

/// Trims every field and drops blank ingredients; fails unless a title, at
/// least one ingredient and instructions remain.
pub fn validate(req: RecipeRequest) -> AppResult<RecipeFields> {
    let title = req.title.trim().to_string();
    let ingredients: Vec<String> = req
        .ingredients
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    let instructions = req.instructions.trim().to_string();
    let image_url = req.image_url.map(|u| u.trim().to_string()).unwrap_or_default();

    if title.is_empty() {
        return Err(AppError::validation("Title is required"));
    }
    if ingredients.is_empty() {
        return Err(AppError::validation("At least one ingredient is required"));
    }
    if instructions.is_empty() {
        return Err(AppError::validation("Instructions are required"));
    }

    Ok(RecipeFields {
        title,
        ingredients,
        instructions,
        image_url,
    })
}

pub async fn create(
    recipes: &dyn RecipeRepo,
    accounts: &dyn AccountRepo,
    owner_id: Uuid,
    req: RecipeRequest,
) -> AppResult<Recipe> {
    let fields = validate(req)?;
    // a valid token does not guarantee the owner row still exists
    current_account(accounts, owner_id).await?;

    let recipe = recipes.insert(Uuid::new_v4(), owner_id, &fields).await?;
    info!(recipe_id = %recipe.id, owner_id = %owner_id, "recipe created");
    Ok(recipe)
}

pub async fn list(recipes: &dyn RecipeRepo, owner_id: Uuid) -> AppResult<Vec<Recipe>> {
    Ok(recipes.list_by_owner(owner_id).await?)
}

/// Owned recipes matching `keyword`; a blank keyword is the same as [`list`].
pub async fn search(
    recipes: &dyn RecipeRepo,
    owner_id: Uuid,
    keyword: &str,
) -> AppResult<Vec<Recipe>> {
    let needle = keyword.trim().to_lowercase();
    let owned = recipes.list_by_owner(owner_id).await?;
    Ok(owned.into_iter().filter(|r| r.matches(&needle)).collect())
}

async fn load_owned(recipes: &dyn RecipeRepo, caller_id: Uuid, recipe_id: Uuid) -> AppResult<Recipe> {
    let recipe = recipes
        .find_by_id(recipe_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))?;
    authorize(caller_id, recipe.owner_id).require("recipe")?;
    Ok(recipe)
}

pub async fn get(recipes: &dyn RecipeRepo, caller_id: Uuid, recipe_id: Uuid) -> AppResult<Recipe> {
    load_owned(recipes, caller_id, recipe_id).await
}

pub async fn update(
    recipes: &dyn RecipeRepo,
    caller_id: Uuid,
    recipe_id: Uuid,
    req: RecipeRequest,
) -> AppResult<Recipe> {
    let fields = validate(req)?;
    load_owned(recipes, caller_id, recipe_id).await?;

    let recipe = recipes
        .update(recipe_id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".into()))?;
    info!(recipe_id = %recipe_id, "recipe updated");
    Ok(recipe)
}

pub async fn delete(recipes: &dyn RecipeRepo, caller_id: Uuid, recipe_id: Uuid) -> AppResult<()> {
    load_owned(recipes, caller_id, recipe_id).await?;

    if !recipes.delete(recipe_id).await? {
        return Err(AppError::NotFound("Recipe not found".into()));
    }
    info!(recipe_id = %recipe_id, owner_id = %caller_id, "recipe deleted");
    Ok(())
}
