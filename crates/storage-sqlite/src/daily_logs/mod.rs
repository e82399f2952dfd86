//! SQLite storage implementation for daily logs.

mod model;
mod repository;

pub use model::{DailyLogDB, NewDailyLogDB};
pub use repository::DailyLogRepository;
