use std::sync::Arc;

use crate::{error::ApiResult, extract::ValidJson, main_lib::AppState};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use usus_core::daily_logs::{DailyLog, DailyLogPatch, NewDailyLog};

async fn list_logs_for_habit(
    Path(habit_id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<DailyLog>>> {
    let logs = state.daily_log_service.list_logs(habit_id)?;
    Ok(Json(logs))
}

async fn get_log(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DailyLog>> {
    let log = state.daily_log_service.get_log(id)?;
    Ok(Json(log))
}

async fn create_log(
    State(state): State<Arc<AppState>>,
    ValidJson(new_log): ValidJson<NewDailyLog>,
) -> ApiResult<(StatusCode, Json<DailyLog>)> {
    let log = state.daily_log_service.create_log(new_log).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

async fn update_log(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    ValidJson(patch): ValidJson<DailyLogPatch>,
) -> ApiResult<Json<DailyLog>> {
    let log = state.daily_log_service.update_log(id, patch).await?;
    Ok(Json(log))
}

async fn delete_log(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.daily_log_service.delete_log(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/logs", post(create_log))
        .route("/logs/habit/{habit_id}", get(list_logs_for_habit))
        .route(
            "/logs/{id}",
            get(get_log).put(update_log).delete(delete_log),
        )
}
