//! In-process store with the same constraints as the Postgres schema.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::answers::repo::UserHasFormRepository;
use crate::answers::repo_types::{NewUserHasForm, UserHasForm, UserHasFormChanges};
use crate::forms::repo::FormRepository;
use crate::forms::repo_types::{Form, FormChanges, NewForm};
use crate::store::StoreError;
use crate::users::repo::UserRepository;
use crate::users::repo_types::{NewUser, User, UserChanges};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    forms: Vec<Form>,
    user_has_forms: Vec<UserHasForm>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<Uuid>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn form_exists(&self, id: Uuid) -> bool {
        self.forms.iter().any(|f| f.id == id)
    }
}

fn unique(constraint: &str) -> StoreError {
    StoreError::UniqueViolation {
        constraint: Some(constraint.to_owned()),
    }
}

fn foreign_key(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation {
        constraint: Some(constraint.to_owned()),
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn insert_user(&self, new: NewUser) -> Result<User, StoreError> {
        let mut t = self.tables.lock().await;
        if t.email_taken(&new.email, None) {
            return Err(unique("users_email_key"));
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            email: new.email,
            password_hash: new.password_hash,
            created_at: now,
            updated_at: now,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.lock().await.users.clone())
    }

    async fn update_user(
        &self,
        id: Uuid,
        changes: UserChanges,
    ) -> Result<Option<User>, StoreError> {
        let mut t = self.tables.lock().await;
        if let Some(email) = &changes.email {
            if t.email_taken(email, Some(id)) {
                return Err(unique("users_email_key"));
            }
        }
        let Some(user) = t.users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(hash) = changes.password_hash {
            user.password_hash = hash;
        }
        user.updated_at = OffsetDateTime::now_utc();
        Ok(Some(user.clone()))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().await;
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        if t.users.len() == before {
            return Ok(false);
        }
        let owned: Vec<Uuid> = t
            .forms
            .iter()
            .filter(|f| f.user_id == id)
            .map(|f| f.id)
            .collect();
        t.forms.retain(|f| f.user_id != id);
        t.user_has_forms
            .retain(|r| r.user_id != id && !owned.contains(&r.form_id));
        Ok(true)
    }
}

#[async_trait]
impl FormRepository for MemoryStore {
    async fn insert_form(&self, new: NewForm) -> Result<Form, StoreError> {
        let mut t = self.tables.lock().await;
        if !t.user_exists(new.user_id) {
            return Err(foreign_key("forms_user_id_fkey"));
        }
        let now = OffsetDateTime::now_utc();
        let form = Form {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            question: sqlx::types::Json(new.question),
            created_at: now,
            updated_at: now,
        };
        t.forms.push(form.clone());
        Ok(form)
    }

    async fn find_form(&self, id: Uuid) -> Result<Option<Form>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.forms.iter().find(|f| f.id == id).cloned())
    }

    async fn list_forms(&self) -> Result<Vec<Form>, StoreError> {
        Ok(self.tables.lock().await.forms.clone())
    }

    async fn update_form(
        &self,
        id: Uuid,
        changes: FormChanges,
    ) -> Result<Option<Form>, StoreError> {
        let mut t = self.tables.lock().await;
        if let Some(owner) = changes.user_id {
            if !t.user_exists(owner) {
                return Err(foreign_key("forms_user_id_fkey"));
            }
        }
        let Some(form) = t.forms.iter_mut().find(|f| f.id == id) else {
            return Ok(None);
        };
        if let Some(owner) = changes.user_id {
            form.user_id = owner;
        }
        if let Some(question) = changes.question {
            form.question = sqlx::types::Json(question);
        }
        form.updated_at = OffsetDateTime::now_utc();
        Ok(Some(form.clone()))
    }

    async fn delete_form(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().await;
        let before = t.forms.len();
        t.forms.retain(|f| f.id != id);
        if t.forms.len() == before {
            return Ok(false);
        }
        t.user_has_forms.retain(|r| r.form_id != id);
        Ok(true)
    }
}

#[async_trait]
impl UserHasFormRepository for MemoryStore {
    async fn insert_user_has_form(
        &self,
        new: NewUserHasForm,
    ) -> Result<UserHasForm, StoreError> {
        let mut t = self.tables.lock().await;
        if !t.user_exists(new.user_id) {
            return Err(foreign_key("user_has_forms_user_id_fkey"));
        }
        if !t.form_exists(new.form_id) {
            return Err(foreign_key("user_has_forms_form_id_fkey"));
        }
        let now = OffsetDateTime::now_utc();
        let row = UserHasForm {
            id: Uuid::new_v4(),
            user_id: new.user_id,
            form_id: new.form_id,
            created_at: now,
            updated_at: now,
        };
        t.user_has_forms.push(row.clone());
        Ok(row)
    }

    async fn find_user_has_form(&self, id: Uuid) -> Result<Option<UserHasForm>, StoreError> {
        let t = self.tables.lock().await;
        Ok(t.user_has_forms.iter().find(|r| r.id == id).cloned())
    }

    async fn list_user_has_forms(&self) -> Result<Vec<UserHasForm>, StoreError> {
        Ok(self.tables.lock().await.user_has_forms.clone())
    }

    async fn update_user_has_form(
        &self,
        id: Uuid,
        changes: UserHasFormChanges,
    ) -> Result<Option<UserHasForm>, StoreError> {
        let mut t = self.tables.lock().await;
        if changes.user_id.is_some_and(|u| !t.user_exists(u)) {
            return Err(foreign_key("user_has_forms_user_id_fkey"));
        }
        if changes.form_id.is_some_and(|f| !t.form_exists(f)) {
            return Err(foreign_key("user_has_forms_form_id_fkey"));
        }
        let Some(row) = t.user_has_forms.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };
        if let Some(user) = changes.user_id {
            row.user_id = user;
        }
        if let Some(form) = changes.form_id {
            row.form_id = form;
        }
        row.updated_at = OffsetDateTime::now_utc();
        Ok(Some(row.clone()))
    }

    async fn delete_user_has_form(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut t = self.tables.lock().await;
        let before = t.user_has_forms.len();
        t.user_has_forms.retain(|r| r.id != id);
        Ok(t.user_has_forms.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn enforces_unique_email() {
        let store = MemoryStore::default();
        let new = || NewUser {
            email: "pri@gmail.com".into(),
            password_hash: "x".into(),
        };
        store.insert_user(new()).await.unwrap();
        assert!(matches!(
            store.insert_user(new()).await.unwrap_err(),
            StoreError::UniqueViolation { .. }
        ));
    }

    #[tokio::test]
    async fn enforces_foreign_keys() {
        let store = MemoryStore::default();
        let err = store
            .insert_user_has_form(NewUserHasForm {
                user_id: Uuid::new_v4(),
                form_id: Uuid::new_v4(),
            })
            .await
            .unwrap_err();
        match err {
            StoreError::ForeignKeyViolation { constraint } => {
                assert_eq!(constraint.as_deref(), Some("user_has_forms_user_id_fkey"))
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
