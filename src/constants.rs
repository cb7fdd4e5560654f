pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_TOKEN_TTL_HOURS: u64 = 24 * 7;
pub const DEFAULT_RECENT_WINDOW: usize = 20;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

pub const MIN_NAME_LENGTH: usize = 2;
pub const MAX_USER_NAME_LENGTH: usize = 60;
pub const MAX_NAME_LENGTH: usize = 120;
pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Largest accepted transaction amount, in whole currency units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;
pub const MAX_BODY_BYTES: usize = 1024 * 1024;
