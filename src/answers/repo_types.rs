use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// A user answering a form. Holds two mandatory, non-owning references.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct UserHasForm {
    pub id: Uuid,
    pub user_id: Uuid,
    pub form_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUserHasForm {
    pub user_id: Uuid,
    pub form_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct UserHasFormChanges {
    pub user_id: Option<Uuid>,
    pub form_id: Option<Uuid>,
}
