//! In-process implementation of every repository trait, backing `AppState::fake()`.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::repo::{Account, AccountRepo, NewAccount},
    favorites::repo::{AddFavorite, FavoriteRepo},
    recipes::repo::{Recipe, RecipeFields, RecipeRepo},
};

/// "account marked recipe as favorite"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FavoriteEdge {
    account_id: Uuid,
    recipe_id: Uuid,
}

#[derive(Default)]
struct Tables {
    accounts: Vec<Account>,
    recipes: Vec<Recipe>,
    favorites: Vec<FavoriteEdge>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Inserts an account directly, bypassing hashing.
    pub fn seed_account(&self, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.lock().accounts.push(Account {
            id,
            name: email.split('@').next().unwrap_or(email).to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$seeded".into(),
            created_at: OffsetDateTime::now_utc(),
        });
        id
    }

    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    pub fn favorite_count(&self) -> usize {
        self.lock().favorites.len()
    }
}

#[async_trait]
impl AccountRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<Account>> {
        Ok(self.lock().accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Account>> {
        Ok(self.lock().accounts.iter().find(|a| a.id == id).cloned())
    }

    async fn create(&self, account: NewAccount) -> anyhow::Result<Option<Account>> {
        let mut t = self.lock();
        if t.accounts.iter().any(|a| a.email == account.email) {
            return Ok(None);
        }
        let created = Account {
            id: account.id,
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        t.accounts.push(created.clone());
        Ok(Some(created))
    }

    async fn update_password_hash(
        &self,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<bool> {
        let mut t = self.lock();
        match t.accounts.iter_mut().find(|a| a.email == email) {
            Some(a) => {
                a.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl RecipeRepo for MemoryStore {
    async fn insert(
        &self,
        id: Uuid,
        owner_id: Uuid,
        fields: &RecipeFields,
    ) -> anyhow::Result<Recipe> {
        let mut t = self.lock();
        anyhow::ensure!(
            t.accounts.iter().any(|a| a.id == owner_id),
            "owner {owner_id} does not exist"
        );
        let recipe = Recipe {
            id,
            title: fields.title.clone(),
            ingredients: fields.ingredients.clone(),
            instructions: fields.instructions.clone(),
            image_url: fields.image_url.clone(),
            owner_id,
            created_at: OffsetDateTime::now_utc(),
        };
        t.recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Recipe>> {
        Ok(self.lock().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        Ok(self
            .lock()
            .recipes
            .iter()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, fields: &RecipeFields) -> anyhow::Result<Option<Recipe>> {
        let mut t = self.lock();
        Ok(t.recipes.iter_mut().find(|r| r.id == id).map(|r| {
            r.title = fields.title.clone();
            r.ingredients = fields.ingredients.clone();
            r.instructions = fields.instructions.clone();
            r.image_url = fields.image_url.clone();
            r.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.lock();
        let before = t.recipes.len();
        t.recipes.retain(|r| r.id != id);
        let deleted = t.recipes.len() != before;
        if deleted {
            t.favorites.retain(|f| f.recipe_id != id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl FavoriteRepo for MemoryStore {
    async fn add(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<AddFavorite> {
        let mut t = self.lock();
        if !t.recipes.iter().any(|r| r.id == recipe_id) {
            return Ok(AddFavorite::RecipeMissing);
        }
        let edge = FavoriteEdge {
            account_id,
            recipe_id,
        };
        if t.favorites.contains(&edge) {
            return Ok(AddFavorite::AlreadyPresent);
        }
        t.favorites.push(edge);
        Ok(AddFavorite::Added)
    }

    async fn remove(&self, account_id: Uuid, recipe_id: Uuid) -> anyhow::Result<bool> {
        let mut t = self.lock();
        let before = t.favorites.len();
        t.favorites
            .retain(|f| !(f.account_id == account_id && f.recipe_id == recipe_id));
        Ok(t.favorites.len() != before)
    }

    async fn list_recipes(&self, account_id: Uuid) -> anyhow::Result<Vec<Recipe>> {
        let t = self.lock();
        Ok(t.favorites
            .iter()
            .filter(|f| f.account_id == account_id)
            .filter_map(|f| t.recipes.iter().find(|r| r.id == f.recipe_id).cloned())
            .collect())
    }
}
