/// Axon system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum accepted query length in bytes.
pub const MAX_QUERY_LENGTH: usize = 1024;

/// Maximum number of activation spreading rounds a query may request.
pub const MAX_ACTIVATION_LEVELS: usize = 10;

/// Maximum result limit a query may request.
pub const MAX_RESULT_LIMIT: usize = 200;

/// Number of buckets in the fusion calibration table (0.1-wide ranges).
pub const CALIBRATION_BUCKETS: usize = 10;
