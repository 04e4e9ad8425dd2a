//! Centralized constants for default endpoints, UA and timeouts.

/// Identifies the crate to the FinMind API.
pub(crate) const USER_AGENT: &str = concat!("revenue-highlights/", env!("CARGO_PKG_VERSION"));

/// FinMind API host (the `api/v4/data` path is appended).
pub(crate) const DEFAULT_BASE_URL: &str = "https://api.finmindtrade.com/";

/// Path of the generic dataset endpoint, relative to the base URL.
pub(crate) const DATA_PATH: &str = "api/v4/data";

/// Dataset name for Taiwan monthly revenue.
pub(crate) const MONTH_REVENUE_DATASET: &str = "TaiwanStockMonthRevenue";

/// Environment variable holding the FinMind API token.
pub(crate) const TOKEN_ENV_VAR: &str = "FINMIND_API_TOKEN";

/// Fixed per-request timeout applied unless overridden on the builder.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 30;
