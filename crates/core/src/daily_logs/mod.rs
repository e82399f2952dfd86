//! Daily logs module - domain models, services, and traits.

mod daily_logs_model;
mod daily_logs_service;
mod daily_logs_traits;


pub use daily_logs_model::{DailyLog, DailyLogPatch, NewDailyLog};
pub use daily_logs_service::DailyLogService;
pub use daily_logs_traits::{DailyLogRepositoryTrait, DailyLogServiceTrait};
