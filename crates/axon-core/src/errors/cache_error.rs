/// Query cache errors. Capacity pressure is resolved by eviction and is
/// never surfaced to a caller; these variants cover the cases eviction
/// cannot fix.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("entry of {size} bytes exceeds the whole cache budget of {budget} bytes")]
    EntryExceedsBudget { size: usize, budget: usize },

    #[error("failed to size cache entry: {reason}")]
    Sizing { reason: String },

    #[error("cache lock poisoned by a panicked writer")]
    Poisoned,
}
