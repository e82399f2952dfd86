//! SQLite storage implementation for habits.

mod model;
mod repository;

pub use model::{HabitDB, NewHabitDB};
pub use repository::HabitRepository;
