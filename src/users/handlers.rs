use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    params::path_id,
    state::AppState,
    users::{
        dto::{
            CreateUserRequest, FindIdRequest, FindIdResponse, LoginRequest, LoginResponse,
            UpdateUserRequest, UserResponse,
        },
        services::{UserDirectory, UserUpdate},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(show_user)
                .patch(update_user)
                .put(update_user)
                .delete(delete_user),
        )
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/user/auth", get(login_query).post(login_json))
        .route("/find_id", get(find_id_query).post(find_id_json))
}

#[instrument(skip(users))]
pub async fn list_users(
    State(users): State<UserDirectory>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let list = users.list().await?;
    Ok(Json(list.into_iter().map(UserResponse::from).collect()))
}

#[instrument(skip(users))]
pub async fn show_user(
    State(users): State<UserDirectory>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = path_id(id, "user")?;
    Ok(Json(users.get(id).await?.into()))
}

#[instrument(skip(users, payload))]
pub async fn create_user(
    State(users): State<UserDirectory>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let Json(payload) = payload?;
    let user = users.create(payload.email, payload.password).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

#[instrument(skip(users, payload))]
pub async fn update_user(
    State(users): State<UserDirectory>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let id = path_id(id, "user")?;
    let Json(payload) = payload?;
    let update = UserUpdate {
        email: payload.email,
        password: payload.password,
    };
    Ok(Json(users.update(id, update).await?.into()))
}

#[instrument(skip(users))]
pub async fn delete_user(
    State(users): State<UserDirectory>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = path_id(id, "user")?;
    users.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn login(users: &UserDirectory, req: LoginRequest) -> Result<Json<LoginResponse>, AppError> {
    let user = users.authenticate(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        message: "authenticated",
        user: user.into(),
    }))
}

#[instrument(skip(users, params))]
pub async fn login_query(
    State(users): State<UserDirectory>,
    params: Result<Query<LoginRequest>, QueryRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Query(req) = params?;
    login(&users, req).await
}

#[instrument(skip(users, payload))]
pub async fn login_json(
    State(users): State<UserDirectory>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(req) = payload?;
    login(&users, req).await
}

#[instrument(skip(users, params))]
pub async fn find_id_query(
    State(users): State<UserDirectory>,
    params: Result<Query<FindIdRequest>, QueryRejection>,
) -> Result<Json<FindIdResponse>, AppError> {
    let Query(req) = params?;
    let id = users.find_id_by_email(&req.email).await?;
    Ok(Json(FindIdResponse { id }))
}

#[instrument(skip(users, payload))]
pub async fn find_id_json(
    State(users): State<UserDirectory>,
    payload: Result<Json<FindIdRequest>, JsonRejection>,
) -> Result<Json<FindIdResponse>, AppError> {
    let Json(req) = payload?;
    let id = users.find_id_by_email(&req.email).await?;
    Ok(Json(FindIdResponse { id }))
}
