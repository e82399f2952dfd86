use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use usus_core::{
    credentials::Argon2Hasher,
    daily_logs::{DailyLogService, DailyLogServiceTrait},
    habits::{HabitService, HabitServiceTrait},
    users::{UserService, UserServiceTrait},
};
use usus_storage_sqlite::{
    db::{self, spawn_writer},
    DailyLogRepository, HabitRepository, UserRepository,
};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub habit_service: Arc<dyn HabitServiceTrait>,
    pub daily_log_service: Arc<dyn DailyLogServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("USUS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let user_repo = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let habit_repo = Arc::new(HabitRepository::new(pool.clone(), writer.clone()));
    let log_repo = Arc::new(DailyLogRepository::new(pool.clone(), writer.clone()));

    let user_service = Arc::new(UserService::new(
        user_repo.clone(),
        Arc::new(Argon2Hasher::new()),
    )?);
    let habit_service = Arc::new(HabitService::new(habit_repo.clone(), user_repo.clone()));
    let daily_log_service = Arc::new(DailyLogService::new(log_repo, habit_repo));

    Ok(Arc::new(AppState {
        user_service,
        habit_service,
        daily_log_service,
    }))
}
