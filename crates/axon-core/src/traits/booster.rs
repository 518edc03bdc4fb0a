use crate::errors::AxonResult;
use crate::models::query::RankedResult;

/// Hierarchical-context relevance reweighting (pipeline stage 6).
/// Implementations receive the ranked results and may rescore them using
/// project-structure context at the requested level.
pub trait ContextBooster: Send + Sync {
    fn boost(
        &self,
        results: Vec<RankedResult>,
        context_level: u8,
    ) -> AxonResult<Vec<RankedResult>>;
}
