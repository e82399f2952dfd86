use std::sync::Arc;

use crate::{error::ApiResult, extract::ValidJson, main_lib::AppState};
use axum::{extract::State, routing::post, Json, Router};
use usus_core::users::{LoginRequest, UserProfile};

/// Verifies an email and password pair.
async fn login(
    State(state): State<Arc<AppState>>,
    ValidJson(request): ValidJson<LoginRequest>,
) -> ApiResult<Json<UserProfile>> {
    let profile = state
        .user_service
        .login(&request.email, &request.password)
        .await?;
    Ok(Json(profile))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/login", post(login))
}
