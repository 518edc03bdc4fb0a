//! Trigger-signature similarity scoring.

use std::collections::BTreeSet;

use axon_core::models::TriggerSignature;

/// Jaccard similarity between two token sets.
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count() as f64;
    let union = a.union(b).count() as f64;
    intersection / union
}

/// Similarity in [0, 1] between the current query context and a stored
/// trigger signature, for one candidate.
///
/// Token overlap carries 0.6 and file involvement 0.4; a candidate
/// whose path was involved in the original failure matches fully on the
/// file component.
pub fn signature_similarity(
    signature: &TriggerSignature,
    query_tokens: &BTreeSet<String>,
    candidate_path: Option<&str>,
) -> f64 {
    let token_score = jaccard(query_tokens, &signature.task_tokens);

    let file_score = candidate_path.map_or(0.0, |path| {
        if signature.files.contains(path) {
            1.0
        } else if signature
            .files
            .iter()
            .any(|f| f.contains(path) || path.contains(f.as_str()))
        {
            0.5
        } else {
            0.0
        }
    });

    0.6 * token_score + 0.4 * file_score
}
