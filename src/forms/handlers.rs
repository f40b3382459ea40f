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
    error::AppError,
    forms::{
        dto::{CreateFormRequest, FormResponse, UpdateFormRequest},
        services::FormCatalog,
    },
    params::path_id,
    state::AppState,
};

pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/forms", get(list_forms).post(create_form))
        .route(
            "/forms/:id",
            get(show_form)
                .patch(update_form)
                .put(update_form)
                .delete(delete_form),
        )
}

#[instrument(skip(forms))]
pub async fn list_forms(
    State(forms): State<FormCatalog>,
) -> Result<Json<Vec<FormResponse>>, AppError> {
    let list = forms.list().await?;
    Ok(Json(list.into_iter().map(FormResponse::from).collect()))
}

#[instrument(skip(forms))]
pub async fn show_form(
    State(forms): State<FormCatalog>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<FormResponse>, AppError> {
    let id = path_id(id, "form")?;
    Ok(Json(forms.get(id).await?.into()))
}

#[instrument(skip(forms, payload))]
pub async fn create_form(
    State(forms): State<FormCatalog>,
    payload: Result<Json<CreateFormRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FormResponse>), AppError> {
    let Json(payload) = payload?;
    let form = forms.create(payload.user_id, payload.question).await?;
    Ok((StatusCode::CREATED, Json(form.into())))
}

#[instrument(skip(forms, payload))]
pub async fn update_form(
    State(forms): State<FormCatalog>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateFormRequest>, JsonRejection>,
) -> Result<Json<FormResponse>, AppError> {
    let id = path_id(id, "form")?;
    let Json(payload) = payload?;
    let form = forms.update(id, payload.user_id, payload.question).await?;
    Ok(Json(form.into()))
}

#[instrument(skip(forms))]
pub async fn delete_form(
    State(forms): State<FormCatalog>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id, "form")?;
    forms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
