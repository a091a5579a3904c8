use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::recipes::repo::Recipe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddFavorite {
    Added,
    AlreadyPresent,
    /// The recipe row vanished before the edge could reference it.
    RecipeMissing,
}

#[async_trait]
pub trait FavoriteRepo: Send + Sync {
    async fn add(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<AddFavorite>;

    /// Returns `false` when there was no such edge.
    async fn remove(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool>;

    /// Favorited recipes of `account_id`, in the order they were favorited.
    async fn list_recipes(&self, account_id: Uuid) -> anyhow::Result<Vec<Recipe>>;
}

#[derive(Clone)]
pub struct PgFavoriteRepo {
    db: PgPool,
}

impl PgFavoriteRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FavoriteRepo for PgFavoriteRepo {
    async fn add(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<AddFavorite> {
        let res = sqlx::query(
            r#"
            INSERT INTO favorites (account_id, recipe_id)
            VALUES ($1, $2)
            ON CONFLICT (account_id, recipe_id) DO NOTHING
            "#,
        )
        .bind(account_id)
        .bind(recipe_id)
        .execute(&self.db)
        .await;

        match res {
            Ok(done) if done.rows_affected() > 0 => Ok(AddFavorite::Added),
            Ok(_) => Ok(AddFavorite::AlreadyPresent),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Ok(AddFavorite::RecipeMissing)
            }
            Err(e) => Err(anyhow::Error::new(e).context("insert favorite")),
        }
    }

    async fn remove(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let res = sqlx::query("DELETE FROM favorites WHERE account_id = $1 AND recipe_id = $2")
            .bind(account_id)
            .bind(recipe_id)
            .execute(&self.db)
            .await
            .context("delete favorite")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_recipes(&self, account_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, Recipe>(
            r#"
            SELECT r.id, r.title, r.ingredients, r.instructions, r.image_url, r.owner_id, r.created_at
              FROM favorites f
              JOIN recipes r ON r.id = f.recipe_id
             WHERE f.account_id = $1
             ORDER BY f.seq ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.db)
        .await
        .context("list favorite recipes")?;
        Ok(rows)
    }
}
