use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// One entry of a form's question list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "pergunta")]
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Form {
    pub id: Uuid,
    pub user_id: Uuid,                 // owner
    pub question: Json<Vec<Question>>, // JSONB, order preserved
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct NewForm {
    pub user_id: Uuid,
    pub question: Vec<Question>,
}

#[derive(Debug, Clone, Default)]
pub struct FormChanges {
    pub user_id: Option<Uuid>,
    pub question: Option<Vec<Question>>,
}
