/// Preference store key the favorites list is persisted under
pub const FAVORITES_STORE_KEY: &str = "favorites";

/// File name used by the file-backed preference store
pub const PREFERENCES_FILE_SUFFIX: &str = ".json";

/// Quiet window the search pipeline waits for before firing a query
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;

/// Upper bound on concurrent quote requests during a refresh
pub const DEFAULT_REFRESH_CONCURRENCY: usize = 4;

/// Crypto assets shown on the board when none are configured
pub const DEFAULT_CRYPTO_ASSETS: &[&str] =
    &["bitcoin", "ethereum", "tether", "cardano", "dogecoin"];
