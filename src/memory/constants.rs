/// Default minimum interval between two paging-activity refreshes (milliseconds)
pub const DEFAULT_SWAP_REFRESH_INTERVAL_MS: u64 = 300;

/// Minimum accepted paging-activity refresh interval (milliseconds)
pub const MIN_SWAP_REFRESH_INTERVAL_MS: u64 = 10;

/// Maximum accepted paging-activity refresh interval (milliseconds)
pub const MAX_SWAP_REFRESH_INTERVAL_MS: u64 = 10_000;
