use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use super::{dto::RecipeRequest, extractors::RecipeId, repo::Recipe, services};
use crate::{
    auth::{dto::MessageResponse, extractors::AuthUser},
    error::AppResult,
    extract::ApiJson,
    state::AppState,
};

pub fn recipe_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/recipe", get(list_recipes).post(create_recipe))
        .route(
            "/auth/recipe/:id",
            get(get_recipe).put(update_recipe).delete(delete_recipe),
        )
}

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/searchRecipes", get(list_recipes))
        .route("/auth/searchRecipes/:keyword", get(search_recipes))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = services::list(state.recipes.as_ref(), owner_id).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    Path(keyword): Path<String>,
) -> AppResult<Json<Vec<Recipe>>> {
    let recipes = services::search(state.recipes.as_ref(), owner_id, &keyword).await?;
    Ok(Json(recipes))
}

#[instrument(skip(state, payload))]
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    ApiJson(payload): ApiJson<RecipeRequest>,
) -> AppResult<impl IntoResponse> {
    let recipe = services::create(
        state.recipes.as_ref(),
        state.accounts.as_ref(),
        owner_id,
        payload,
    )
    .await?;
    let location = format!("/auth/recipe/{}", recipe.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(recipe)))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    RecipeId(id): RecipeId,
) -> AppResult<Json<Recipe>> {
    Ok(Json(services::get(state.recipes.as_ref(), owner_id, id).await?))
}

#[instrument(skip(state, payload))]
pub async fn update_recipe(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    RecipeId(id): RecipeId,
    ApiJson(payload): ApiJson<RecipeRequest>,
) -> AppResult<Json<Recipe>> {
    let recipe = services::update(state.recipes.as_ref(), owner_id, id, payload).await?;
    Ok(Json(recipe))
}

#[instrument(skip(state))]
pub async fn delete_recipe(
    State(state): State<AppState>,
    AuthUser(owner_id): AuthUser,
    RecipeId(id): RecipeId,
) -> AppResult<Json<MessageResponse>> {
    services::delete(state.recipes.as_ref(), owner_id, id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted")))
}
