use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, ValidationErrors, BLANK, MUST_EXIST};
use crate::forms::repo_types::{Form, FormChanges, NewForm, Question};
use crate::params::RawRef;
use crate::store::{resolve_user, Store};

/// Plain CRUD over forms, with the owner reference checked on write.
#[derive(Clone)]
pub struct FormCatalog {
    store: Arc<dyn Store>,
}

impl FormCatalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Form>, AppError> {
        Ok(self.store.list_forms().await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Form, AppError> {
        self.store
            .find_form(id)
            .await?
            .ok_or(AppError::NotFound("form"))
    }

    pub async fn create(
        &self,
        user_id: RawRef,
        question: Option<Vec<Question>>,
    ) -> Result<Form, AppError> {
        let mut errors = ValidationErrors::default();
        let owner = resolve_user(self.store.as_ref(), &user_id).await?;
        if owner.is_none() {
            errors.add("user", MUST_EXIST);
        }
        let question = question.unwrap_or_default();
        if question.is_empty() {
            errors.add("question", BLANK);
        }
        errors.into_result()?;

        let user_id = owner.ok_or_else(|| AppError::invalid("user", MUST_EXIST))?;
        let form = self.store.insert_form(NewForm { user_id, question }).await?;
        info!(form_id = %form.id, user_id = %form.user_id, "form created");
        Ok(form)
    }

    /// `user_id` and `question` are only touched when provided.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Option<RawRef>,
        question: Option<Option<Vec<Question>>>,
    ) -> Result<Form, AppError> {
        self.get(id).await?;
        let mut errors = ValidationErrors::default();
        let mut changes = FormChanges::default();

        if let Some(reference) = user_id {
            match resolve_user(self.store.as_ref(), &reference).await? {
                Some(owner) => changes.user_id = Some(owner),
                None => errors.add("user", MUST_EXIST),
            }
        }
        if let Some(question) = question {
            match question {
                Some(q) if !q.is_empty() => changes.question = Some(q),
                _ => errors.add("question", BLANK),
            }
        }
        errors.into_result()?;

        let form = self
            .store
            .update_form(id, changes)
            .await?
            .ok_or(AppError::NotFound("form"))?;
        info!(form_id = %form.id, "form updated");
        Ok(form)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete_form(id).await? {
            return Err(AppError::NotFound("form"));
        }
        info!(form_id = %id, "form deleted");
        Ok(())
    }
}
