use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{ForgotPasswordRequest, LoginRequest, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo::{Account, AccountRepo, NewAccount},
};
use crate::error::{AppError, AppResult};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn issue_token(keys: &JwtKeys, account_id: Uuid) -> AppResult<String> {
    keys.sign(account_id)
        .map_err(|e| AppError::Internal(anyhow::Error::from(e)))
}

pub async fn register(
    accounts: &dyn AccountRepo,
    keys: &JwtKeys,
    req: RegisterRequest,
) -> AppResult<String> {
    let name = req.name.trim().to_string();
    let email = normalize_email(&req.email);

    if name.is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::validation("Invalid email"));
    }
    if req.password.is_empty() {
        return Err(AppError::validation("Password is required"));
    }

    if accounts.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AppError::Conflict("User already exists".into()));
    }

    let password_hash = hash_password(&req.password)?;
    let account = accounts
        .create(NewAccount {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
        })
        .await?
        // lost a race with a concurrent registration of the same email
        .ok_or_else(|| AppError::Conflict("User already exists".into()))?;

    info!(account_id = %account.id, email = %account.email, "account registered");
    issue_token(keys, account.id)
}

pub async fn login(
    accounts: &dyn AccountRepo,
    keys: &JwtKeys,
    req: LoginRequest,
) -> AppResult<String> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.password.is_empty() {
        return Err(AppError::validation("Email and password are required"));
    }

    let Some(account) = accounts.find_by_email(&email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&req.password, &account.password_hash)? {
        warn!(account_id = %account.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    info!(account_id = %account.id, "account logged in");
    issue_token(keys, account.id)
}

/// Overwrites the password of the account registered under `email`.
///
/// Knowing the email is sufficient; no prior authentication or possession
/// proof is checked.
pub async fn reset_password(
    accounts: &dyn AccountRepo,
    req: ForgotPasswordRequest,
) -> AppResult<()> {
    let email = normalize_email(&req.email);
    if email.is_empty() || req.new_password.is_empty() {
        return Err(AppError::validation("Email and new password are required"));
    }

    if accounts.find_by_email(&email).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }

    let password_hash = hash_password(&req.new_password)?;
    if !accounts.update_password_hash(&email, &password_hash).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    info!(email = %email, "password reset");
    Ok(())
}

/// Resolves a token subject back to a stored account.
pub async fn current_account(accounts: &dyn AccountRepo, account_id: Uuid) -> AppResult<Account> {
    accounts
        .find_by_id(account_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Account no longer exists".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::AppConfig, memory::MemoryStore};

    fn keys() -> JwtKeys {
        JwtKeys::from(&AppConfig::for_tests().jwt)
    }

    fn reg(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    fn creds(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("ann@x.com"));
        assert!(!is_valid_email("ann@x"));
        assert!(!is_valid_email("ann x@x.com"));
        assert_eq!(normalize_email("  ANN@X.Com "), "ann@x.com");
    }

    #[tokio::test]
    async fn register_returns_token_for_new_account() {
        let store = MemoryStore::default();
        let keys = keys();
        let token = register(&store, &keys, reg("Ann", "ann@x.com", "pw123"))
            .await
            .expect("register");
        let claims = keys.verify(&token).expect("token verifies");

        let account = store.find_by_email("ann@x.com").await.unwrap().unwrap();
        assert_eq!(claims.sub, account.id);
        assert_eq!(account.name, "Ann");
        assert_ne!(account.password_hash, "pw123");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let store = MemoryStore::default();
        let keys = keys();
        register(&store, &keys, reg("Ann", "ann@x.com", "pw123"))
            .await
            .unwrap();

        let err = register(&store, &keys, reg("Other", "ANN@X.COM", "different"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.account_count(), 1);
    }

    #[tokio::test]
    async fn register_validates_input() {
        let store = MemoryStore::default();
        let keys = keys();
        for bad in [
            reg("", "ann@x.com", "pw"),
            reg("Ann", "not-an-email", "pw"),
            reg("Ann", "ann@x.com", ""),
        ] {
            let err = register(&store, &keys, bad).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(store.account_count(), 0);
    }

    #[tokio::test]
    async fn login_normalizes_email() {
        let store = MemoryStore::default();
        let keys = keys();
        register(&store, &keys, reg("Ann", "ann@x.com", "pw123"))
            .await
            .unwrap();

        let token = login(&store, &keys, creds("ANN@X.COM", "pw123"))
            .await
            .expect("login");
        assert!(keys.verify(&token).is_ok());
    }

    #[tokio::test]
    async fn login_rejects_unknown_email_and_wrong_password() {
        let store = MemoryStore::default();
        let keys = keys();
        register(&store, &keys, reg("Ann", "ann@x.com", "pw123"))
            .await
            .unwrap();

        let err = login(&store, &keys, creds("bob@x.com", "pw123"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));

        let err = login(&store, &keys, creds("ann@x.com", "nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn reset_password_swaps_credentials() {
        let store = MemoryStore::default();
        let keys = keys();
        register(&store, &keys, reg("Ann", "ann@x.com", "old-pw"))
            .await
            .unwrap();

        reset_password(
            &store,
            ForgotPasswordRequest {
                email: "Ann@X.com".into(),
                new_password: "new-pw".into(),
            },
        )
        .await
        .expect("reset");

        assert!(login(&store, &keys, creds("ann@x.com", "new-pw")).await.is_ok());
        let err = login(&store, &keys, creds("ann@x.com", "old-pw"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn reset_password_unknown_email_is_not_found() {
        let store = MemoryStore::default();
        let err = reset_password(
            &store,
            ForgotPasswordRequest {
                email: "ghost@x.com".into(),
                new_password: "whatever".into(),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn current_account_requires_existing_account() {
        let store = MemoryStore::default();
        let err = current_account(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}
