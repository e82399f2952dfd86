use std::sync::Arc;

use crate::{error::ApiResult, extract::ValidJson, main_lib::AppState};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use usus_core::habits::{Habit, HabitPatch, HabitWithLogs, NewHabit};

/// Owner used when a listing names no user.
const DEFAULT_USER_ID: i32 = 1;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListHabitsQuery {
    user_id: Option<i32>,
}

async fn list_habits(
    Query(query): Query<ListHabitsQuery>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<HabitWithLogs>>> {
    let user_id = query.user_id.unwrap_or(DEFAULT_USER_ID);
    let habits = state.habit_service.list_habits(user_id)?;
    Ok(Json(habits))
}

async fn get_habit(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HabitWithLogs>> {
    let habit = state.habit_service.get_habit(id)?;
    Ok(Json(habit))
}

async fn create_habit(
    State(state): State<Arc<AppState>>,
    ValidJson(new_habit): ValidJson<NewHabit>,
) -> ApiResult<(StatusCode, Json<Habit>)> {
    let habit = state.habit_service.create_habit(new_habit).await?;
    Ok((StatusCode::CREATED, Json(habit)))
}

async fn update_habit(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
    ValidJson(patch): ValidJson<HabitPatch>,
) -> ApiResult<Json<Habit>> {
    let habit = state.habit_service.update_habit(id, patch).await?;
    Ok(Json(habit))
}

async fn delete_habit(
    Path(id): Path<i32>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.habit_service.delete_habit(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/habits", get(list_habits).post(create_habit))
        .route(
            "/habits/{id}",
            get(get_habit).put(update_habit).delete(delete_habit),
        )
}
