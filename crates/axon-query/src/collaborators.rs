//! Default implementations of the external collaborator seams.

use axon_core::errors::AxonResult;
use axon_core::models::RankedResult;
use axon_core::traits::{AttentionRefocuser, ContextBooster};

/// No-op context boost: results pass through unchanged until a real
/// hierarchical-context collaborator is plugged in.
#[derive(Debug, Default)]
pub struct PassthroughBooster;

impl ContextBooster for PassthroughBooster {
    fn boost(
        &self,
        results: Vec<RankedResult>,
        _context_level: u8,
    ) -> AxonResult<Vec<RankedResult>> {
        Ok(results)
    }
}

/// Default attention: keep the top `limit` results in their current order.
#[derive(Debug, Default)]
pub struct TopKAttention;

impl AttentionRefocuser for TopKAttention {
    fn refocus(
        &self,
        mut results: Vec<RankedResult>,
        limit: usize,
    ) -> AxonResult<Vec<RankedResult>> {
        results.truncate(limit);
        Ok(results)
    }
}
