use crate::errors::AxonResult;
use crate::models::query::RankedResult;

/// Attention-based refocus and truncation (pipeline stage 7).
/// The default implementation truncates to the top `limit` results;
/// richer implementations may refocus around the caller's working set.
pub trait AttentionRefocuser: Send + Sync {
    fn refocus(&self, results: Vec<RankedResult>, limit: usize) -> AxonResult<Vec<RankedResult>>;
}
