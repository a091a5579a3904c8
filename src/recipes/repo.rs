use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub use crate::recipes::repo_types::{Recipe, RecipeFields};

#[async_trait]
pub trait RecipeRepo: Send + Sync {
    async fn insert(&self, id: Uuid, owner_id: Uuid, fields: &RecipeFields)
        -> anyhow::Result<Recipe>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Recipe>>;

    /// Owned recipes in insertion order.
    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Recipe>>;

    async fn update(&self, id: Uuid, fields: &RecipeFields) -> anyhow::Result<Option<Recipe>>;

    /// Removes the recipe and every favorite pointing at it. Returns `false`
    /// when nothing was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgRecipeRepo {
    db: PgPool,
}

impl PgRecipeRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeRepo for PgRecipeRepo {
    async fn insert(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: &RecipeFields,
    ) -> anyhow::Result<Recipe> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            INSERT INTO recipes (id, owner_id, title, ingredients, instructions, image_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, ingredients, instructions, image_url, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&fields.title)
        .bind(&fields.ingredients)
        .bind(&fields.instructions)
        .bind(&fields.image_url)
        .fetch_one(&self.db)
        .await
        .context("insert recipe")?;
        Ok(recipe)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, instructions, image_url, owner_id, created_at
            FROM recipes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .context("find recipe")?;
        Ok(recipe)
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT id, title, ingredients, instructions, image_url, owner_id, created_at
            FROM recipes
            WHERE owner_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await
        .context("list recipes by owner")?;
        Ok(rows)
    }

    async fn update(&self, id: Uuid, fields: &RecipeFields) -> anyhow::Result<Option<Recipe>> {
        let recipe = sqlx::query_as::<_, Recipe>(
            r#"
            UPDATE recipes
               SET title = $2, ingredients = $3, instructions = $4, image_url = $5
             WHERE id = $1
            RETURNING id, title, ingredients, instructions, image_url, owner_id, created_at
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.ingredients)
        .bind(&fields.instructions)
        .bind(&fields.image_url)
        .fetch_optional(&self.db)
        .await
        .context("update recipe")?;
        Ok(recipe)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        // favorites go with it via ON DELETE CASCADE
        let res = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await
            .context("delete recipe")?;
        Ok(res.rows_affected() > 0)
    }
}
