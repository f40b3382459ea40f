use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::answers::repo::UserHasFormRepository;
use crate::config::AppConfig;
use crate::forms::repo::FormRepository;
use crate::params::RawRef;
use crate::users::repo::UserRepository;

#[cfg(test)]
pub mod memory;

/// Failure reported by a repository implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated ({constraint:?})")]
    UniqueViolation { constraint: Option<String> },

    #[error("foreign key constraint violated ({constraint:?})")]
    ForeignKeyViolation { constraint: Option<String> },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let constraint = db.constraint().map(str::to_owned);
            if db.is_unique_violation() {
                return StoreError::UniqueViolation { constraint };
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation { constraint };
            }
        }
        StoreError::Backend(e.into())
    }
}

/// Everything the request handlers persist through.
pub trait Store: UserRepository + FormRepository + UserHasFormRepository {}

impl<T> Store for T where T: UserRepository + FormRepository + UserHasFormRepository {}

/// `Some(id)` only when the reference names an existing user.
pub async fn resolve_user<S: Store + ?Sized>(
    store: &S,
    reference: &RawRef,
) -> Result<Option<Uuid>, StoreError> {
    match reference.id() {
        Some(id) => Ok(store.find_user(id).await?.map(|u| u.id)),
        None => Ok(None),
    }
}

/// `Some(id)` only when the reference names an existing form.
pub async fn resolve_form<S: Store + ?Sized>(
    store: &S,
    reference: &RawRef,
) -> Result<Option<Uuid>, StoreError> {
    match reference.id() {
        Some(id) => Ok(store.find_form(id).await?.map(|f| f.id)),
        None => Ok(None),
    }
}

/// Postgres-backed store. Repository impls live next to each entity.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self::new(pool))
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .context("run migrations")?;
        Ok(())
    }
}
