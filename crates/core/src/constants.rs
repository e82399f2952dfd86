/// Maximum username length
pub const USERNAME_MAX_LEN: usize = 100;

/// Maximum email length
pub const EMAIL_MAX_LEN: usize = 255;

/// Maximum habit name length
pub const HABIT_NAME_MAX_LEN: usize = 200;

/// Maximum habit description length
pub const HABIT_DESCRIPTION_MAX_LEN: usize = 1000;

/// Maximum daily log notes length
pub const LOG_NOTES_MAX_LEN: usize = 500;

/// Default habit target count
pub const DEFAULT_TARGET_COUNT: i32 = 1;

/// Completed count used when a creation request omits it
pub const DEFAULT_REQUEST_COMPLETED_COUNT: i32 = 1;

/// Message returned for every failed login, whatever the cause
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
