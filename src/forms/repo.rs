use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use crate::forms::repo_types::{Form, FormChanges, NewForm};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait FormRepository: Send + Sync {
    async fn insert_form(&self, new: NewForm) -> Result<Form, StoreError>;
    async fn find_form(&self, id: Uuid) -> Result<Option<Form>, StoreError>;
    async fn list_forms(&self) -> Result<Vec<Form>, StoreError>;
    async fn update_form(&self, id: Uuid, changes: FormChanges)
        -> Result<Option<Form>, StoreError>;
    /// Removes the form together with its associations.
    async fn delete_form(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl FormRepository for PgStore {
    async fn insert_form(&self, new: NewForm) -> Result<Form, StoreError> {
        let form = sqlx::query_as::<_, Form>(
            r#"
            INSERT INTO forms (id, user_id, question)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, question, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(Json(new.question))
        .fetch_one(&self.pool)
        .await?;
        Ok(form)
    }

    async fn find_form(&self, id: Uuid) -> Result<Option<Form>, StoreError> {
        let form = sqlx::query_as::<_, Form>(
            r#"
            SELECT id, user_id, question, created_at, updated_at
            FROM forms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(form)
    }

    async fn list_forms(&self) -> Result<Vec<Form>, StoreError> {
        let rows = sqlx::query_as::<_, Form>(
            r#"
            SELECT id, user_id, question, created_at, updated_at
            FROM forms
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_form(
        &self,
        id: Uuid,
        changes: FormChanges,
    ) -> Result<Option<Form>, StoreError> {
        let form = sqlx::query_as::<_, Form>(
            r#"
            UPDATE forms
            SET user_id = COALESCE($2, user_id),
                question = COALESCE($3, question),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, question, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.user_id)
        .bind(changes.question.map(Json))
        .fetch_optional(&self.pool)
        .await?;
        Ok(form)
    }

    async fn delete_form(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
