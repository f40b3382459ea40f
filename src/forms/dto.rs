use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::forms::repo_types::{Form, Question};
use crate::params::{present, RawRef};

#[derive(Debug, Default, Deserialize)]
pub struct CreateFormRequest {
    #[serde(default)]
    pub user_id: RawRef,
    #[serde(default)]
    pub question: Option<Vec<Question>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateFormRequest {
    #[serde(default, deserialize_with = "present")]
    pub user_id: Option<RawRef>,
    #[serde(default, deserialize_with = "present")]
    pub question: Option<Option<Vec<Question>>>,
}

#[derive(Debug, Serialize)]
pub struct FormResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub question: Vec<Question>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Form> for FormResponse {
    fn from(f: Form) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            question: f.question.0,
            created_at: f.created_at,
            updated_at: f.updated_at,
        }
    }
}
