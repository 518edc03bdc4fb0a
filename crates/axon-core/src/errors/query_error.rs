/// Query pipeline errors.
///
/// `RankingFailed` and `CacheCorrupted` are hard failures that abort the
/// query and surface to the caller: the former when the core ranker
/// produces a non-finite score (a scanner ingested a NaN or infinite edge
/// weight), the latter when the cache lock was poisoned by a panicked
/// writer. Auxiliary stage failures are recovered inside the pipeline and
/// never escape as errors.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("query of {len} bytes exceeds the maximum of {max}")]
    QueryTooLong { len: usize, max: usize },

    #[error("invalid query options: {reason}")]
    InvalidOptions { reason: String },

    #[error("candidate ranking failed: {reason}")]
    RankingFailed { reason: String },

    #[error("cache corrupted: {reason}")]
    CacheCorrupted { reason: String },
}
