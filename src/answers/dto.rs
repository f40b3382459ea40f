use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::answers::repo_types::UserHasForm;
use crate::params::{present, RawRef};

#[derive(Debug, Default, Deserialize)]
pub struct CreateUserHasFormRequest {
    #[serde(default)]
    pub user_id: RawRef,
    #[serde(default)]
    pub form_id: RawRef,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserHasFormRequest {
    #[serde(default, deserialize_with = "present")]
    pub user_id: Option<RawRef>,
    #[serde(default, deserialize_with = "present")]
    pub form_id: Option<RawRef>,
}

#[derive(Debug, Serialize)]
pub struct UserHasFormResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub form_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<UserHasForm> for UserHasFormResponse {
    fn from(r: UserHasForm) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            form_id: r.form_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}
