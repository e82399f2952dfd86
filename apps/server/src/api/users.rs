use std::sync::Arc;

use crate::{error::ApiResult, extract::ValidJson, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use usus_core::users::{NewUserRequest, UpdateUserRequest, UserProfile};

async fn register_user(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<NewUserRequest>,
) -> ApiResult<(StatusCode, Json<UserProfile>)> {
    let profile = state.user_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn get_user(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.user_service.get_user(id)?;
    Ok(Json(profile))
}

async fn update_user(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<UpdateUserRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state.user_service.update_user(id, request).await?;
    Ok(Json(profile))
}

async fn delete_user(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", post(register_user)).route(
        "/users/{id}",
        get(get_user).put(update_user).delete(delete_user),
    )
}
