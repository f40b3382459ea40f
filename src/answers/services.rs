use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::answers::repo_types::{NewUserHasForm, UserHasForm, UserHasFormChanges};
use crate::error::{AppError, ValidationErrors, MUST_EXIST};
use crate::params::RawRef;
use crate::store::{resolve_form, resolve_user, Store};

/// Records which users answered which forms.
///
/// Every write resolves both references against the store first, so a
/// dangling or malformed id is reported as a validation failure naming the
/// offending reference and nothing is persisted. The store's foreign keys
/// still back this up for writes that race a delete.
#[derive(Clone)]
pub struct AnswerRegistrar {
    store: Arc<dyn Store>,
}

impl AnswerRegistrar {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<UserHasForm>, AppError> {
        Ok(self.store.list_user_has_forms().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<UserHasForm, AppError> {
        self.store
            .find_user_has_form(id)
            .await?
            .ok_or(AppError::NotFound("user_has_form"))
    }

    pub async fn create(&self, user_id: RawRef, form_id: RawRef) -> Result<UserHasForm, AppError> {
        let user = resolve_user(self.store.as_ref(), &user_id).await?;
        let form = resolve_form(self.store.as_ref(), &form_id).await?;

        let (Some(user_id), Some(form_id)) = (user, form) else {
            let mut errors = ValidationErrors::default();
            if user.is_none() {
                errors.add("user", MUST_EXIST);
            }
            if form.is_none() {
                errors.add("form", MUST_EXIST);
            }
            warn!(?user_id, ?form_id, "association rejected: {errors}");
            return Err(AppError::Validation(errors));
        };

        let row = self
            .store
            .insert_user_has_form(NewUserHasForm { user_id, form_id })
            .await?;
        info!(id = %row.id, %user_id, %form_id, "association created");
        Ok(row)
    }

    /// Only the references that are provided change.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Option<RawRef>,
        form_id: Option<RawRef>,
    ) -> Result<UserHasForm, AppError> {
        self.get(id).await?;

        let mut errors = ValidationErrors::default();
        let mut changes = UserHasFormChanges::default();
        if let Some(reference) = user_id {
            match resolve_user(self.store.as_ref(), &reference).await? {
                Some(user) => changes.user_id = Some(user),
                None => errors.add("user", MUST_EXIST),
            }
        }
        if let Some(reference) = form_id {
            match resolve_form(self.store.as_ref(), &reference).await? {
                Some(form) => changes.form_id = Some(form),
                None => errors.add("form", MUST_EXIST),
            }
        }
        if !errors.is_empty() {
            warn!(%id, "association update rejected: {errors}");
        }
        errors.into_result()?;

        let row = self
            .store
            .update_user_has_form(id, changes)
            .await?
            .ok_or(AppError::NotFound("user_has_form"))?;
        info!(%id, user_id = %row.user_id, form_id = %row.form_id, "association updated");
        Ok(row)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_user_has_form(id).await? {
            return Err(AppError::NotFound("user_has_form"));
        }
        info!(%id, "association deleted");
        Ok(())
    }
}
