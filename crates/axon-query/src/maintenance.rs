//! Out-of-band maintenance: learning-table decay and graph compaction.

use tracing::info;

use axon_hebbian::DecaySweepReport;

use crate::orchestrator::QueryOrchestrator;

/// What one maintenance pass did.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaintenanceReport {
    pub hebbian: DecaySweepReport,
    pub inhibition_decayed: usize,
    pub inhibition_pruned: usize,
    pub compacted_edges: usize,
}

impl QueryOrchestrator {
    /// Run the full maintenance cycle: Hebbian decay, inhibitory decay,
    /// dangling-edge compaction. Scheduled between queries; the learning
    /// sweeps are shard-safe against concurrent readers.
    pub fn run_maintenance(&mut self) -> MaintenanceReport {
        let hebbian = self.hebbian().decay();
        let (inhibition_decayed, inhibition_pruned) = self.inhibition().decay();
        let compacted_edges = self.store_mut().compact_dangling();

        let report = MaintenanceReport {
            hebbian,
            inhibition_decayed,
            inhibition_pruned,
            compacted_edges,
        };
        info!(
            hebbian_decayed = report.hebbian.decayed,
            hebbian_pruned = report.hebbian.pruned,
            inhibition_decayed,
            inhibition_pruned,
            compacted_edges,
            "maintenance cycle complete"
        );
        report
    }
}
