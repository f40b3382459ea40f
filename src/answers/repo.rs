use async_trait::async_trait;
use uuid::Uuid;

use crate::answers::repo_types::{NewUserHasForm, UserHasForm, UserHasFormChanges};
use crate::store::{PgStore, StoreError};

#[async_trait]
pub trait UserHasFormRepository: Send + Sync {
    async fn insert_user_has_form(&self, new: NewUserHasForm)
        -> Result<UserHasForm, StoreError>;
    async fn find_user_has_form(&self, id: Uuid) -> Result<Option<UserHasForm>, StoreError>;
    async fn list_user_has_forms(&self) -> Result<Vec<UserHasForm>, StoreError>;
    async fn update_user_has_form(
        &self,
        id: Uuid,
        changes: UserHasFormChanges,
    ) -> Result<Option<UserHasForm>, StoreError>;
    async fn delete_user_has_form(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
impl UserHasFormRepository for PgStore {
    async fn insert_user_has_form(
        &self,
        new: NewUserHasForm,
    ) -> Result<UserHasForm, StoreError> {
        let row = sqlx::query_as::<_, UserHasForm>(
            r#"
            INSERT INTO user_has_forms (id, user_id, form_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, form_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(new.user_id)
        .bind(new.form_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_user_has_form(&self, id: Uuid) -> Result<Option<UserHasForm>, StoreError> {
        let row = sqlx::query_as::<_, UserHasForm>(
            r#"
            SELECT id, user_id, form_id, created_at, updated_at
            FROM user_has_forms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn list_user_has_forms(&self) -> Result<Vec<UserHasForm>, StoreError> {
        let rows = sqlx::query_as::<_, UserHasForm>(
            r#"
            SELECT id, user_id, form_id, created_at, updated_at
            FROM user_has_forms
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update_user_has_form(
        &self,
        id: Uuid,
        changes: UserHasFormChanges,
    ) -> Result<Option<UserHasForm>, StoreError> {
        let row = sqlx::query_as::<_, UserHasForm>(
            r#"
            UPDATE user_has_forms
            SET user_id = COALESCE($2, user_id),
                form_id = COALESCE($3, form_id),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, form_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.user_id)
        .bind(changes.form_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_user_has_form(&self, id: Uuid) -> Result<bool, StoreError> {
        let res = sqlx::query("DELETE FROM user_has_forms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
