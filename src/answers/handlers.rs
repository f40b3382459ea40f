use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    answers::{
        dto::{CreateUserHasFormRequest, UpdateUserHasFormRequest, UserHasFormResponse},
        services::AnswerRegistrar,
    },
    error::AppError,
    params::path_id,
    state::AppState,
};

pub fn user_has_form_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/user_has_forms",
            get(list_user_has_forms).post(create_user_has_form),
        )
        .route(
            "/user_has_forms/:id",
            get(show_user_has_form)
                .patch(update_user_has_form)
                .put(update_user_has_form)
                .delete(delete_user_has_form),
        )
}

#[instrument(skip(registrar))]
pub async fn list_user_has_forms(
    State(registrar): State<AnswerRegistrar>,
) -> Result<Json<Vec<UserHasFormResponse>>, AppError> {
    let rows = registrar.list().await?;
    Ok(Json(rows.into_iter().map(UserHasFormResponse::from).collect()))
}

#[instrument(skip(registrar))]
pub async fn show_user_has_form(
    State(registrar): State<AnswerRegistrar>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserHasFormResponse>, AppError> {
    let id = path_id(id, "user_has_form")?;
    Ok(Json(registrar.get(id).await?.into()))
}

#[instrument(skip(registrar, payload))]
pub async fn create_user_has_form(
    State(registrar): State<AnswerRegistrar>,
    payload: Result<Json<CreateUserHasFormRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserHasFormResponse>), AppError> {
    let Json(payload) = payload?;
    let row = registrar.create(payload.user_id, payload.form_id).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

#[instrument(skip(registrar, payload))]
pub async fn update_user_has_form(
    State(registrar): State<AnswerRegistrar>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserHasFormRequest>, JsonRejection>,
) -> Result<Json<UserHasFormResponse>, AppError> {
    let id = path_id(id, "user_has_form")?;
    let Json(payload) = payload?;
    let row = registrar
        .update(id, payload.user_id, payload.form_id)
        .await?;
    Ok(Json(row.into()))
}

#[instrument(skip(registrar))]
pub async fn delete_user_has_form(
    State(registrar): State<AnswerRegistrar>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id, "user_has_form")?;
    registrar.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
