use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{AppError, ValidationErrors, BLANK, INVALID, TAKEN};
use crate::store::Store;
use crate::users::password::CredentialHasher;
use crate::users::repo_types::{NewUser, User, UserChanges};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Attribute changes for [`UserDirectory::update`]. The outer `Option` is
/// "was the field sent", the inner one "was it non-null".
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<Option<String>>,
    pub password: Option<Option<String>>,
}

/// User accounts: CRUD, login and email lookup.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn Store>,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn Store>, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { store, hasher }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.store.list_users().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .find_user(id)
            .await?
            .ok_or(AppError::NotFound("user"))
    }

    pub async fn create(
        &self,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<User, AppError> {
        let mut errors = ValidationErrors::default();
        let email = email.as_deref().map(normalize_email).unwrap_or_default();
        self.check_email(&email, None, &mut errors).await?;
        let password = password.unwrap_or_default();
        if password.is_empty() {
            errors.add("password", BLANK);
        }
        errors.into_result()?;

        let password_hash = self.hasher.hash(&password)?;
        let user = self
            .store
            .insert_user(NewUser {
                email,
                password_hash,
            })
            .await?;
        info!(user_id = %user.id, email = %user.email, "user created");
        Ok(user)
    }

    pub async fn update(&self, id: Uuid, update: UserUpdate) -> Result<User, AppError> {
        let current = self.get(id).await?;
        let mut errors = ValidationErrors::default();
        let mut changes = UserChanges::default();

        if let Some(email) = update.email {
            let email = email.as_deref().map(normalize_email).unwrap_or_default();
            if email != current.email {
                self.check_email(&email, Some(id), &mut errors).await?;
                changes.email = Some(email);
            }
        }
        if let Some(password) = update.password {
            match password {
                Some(p) if !p.is_empty() => changes.password_hash = Some(self.hasher.hash(&p)?),
                _ => errors.add("password", BLANK),
            }
        }
        errors.into_result()?;

        let user = self
            .store
            .update_user(id, changes)
            .await?
            .ok_or(AppError::NotFound("user"))?;
        info!(user_id = %user.id, "user updated");
        Ok(user)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_user(id).await? {
            return Err(AppError::NotFound("user"));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        let Some(user) = self.store.find_user_by_email(&email).await? else {
            warn!(email = %email, "login unknown email");
            return Err(AppError::Authentication);
        };
        if !self.hasher.verify(password, &user.password_hash)? {
            warn!(email = %email, user_id = %user.id, "login invalid password");
            return Err(AppError::Authentication);
        }
        info!(user_id = %user.id, "user authenticated");
        Ok(user)
    }

    pub async fn find_id_by_email(&self, email: &str) -> Result<Uuid, AppError> {
        let email = normalize_email(email);
        let user = self
            .store
            .find_user_by_email(&email)
            .await?
            .ok_or(AppError::NotFound("user"))?;
        debug!(user_id = %user.id, "id found by email");
        Ok(user.id)
    }

    /// Presence, format and uniqueness; `owner` is excluded from the
    /// uniqueness check.
    async fn check_email(
        &self,
        email: &str,
        owner: Option<Uuid>,
        errors: &mut ValidationErrors,
    ) -> Result<(), AppError> {
        if email.is_empty() {
            errors.add("email", BLANK);
        } else if !is_valid_email(email) {
            errors.add("email", INVALID);
        } else if let Some(existing) = self.store.find_user_by_email(email).await? {
            if Some(existing.id) != owner {
                errors.add("email", TAKEN);
            }
        }
        Ok(())
    }
}
