use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Error details attached to a task failure report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureDetails {
    /// Coarse category, e.g. "import", "type", "timeout".
    pub category: String,
    /// Optional raw error message.
    pub message: Option<String>,
}

impl FailureDetails {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Normalized failure-trigger signature: what the task was about, what
/// category of error it hit, and which files were involved. BTreeSets keep
/// the canonical form (and thus the fingerprint) order-independent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSignature {
    pub task_tokens: BTreeSet<String>,
    pub error_category: String,
    pub files: BTreeSet<String>,
}

impl TriggerSignature {
    pub fn from_failure(task: &str, category: &str, files: &[String]) -> Self {
        Self {
            task_tokens: tokenize(task),
            error_category: category.trim().to_lowercase(),
            files: files.iter().map(|f| f.trim().to_string()).collect(),
        }
    }

    /// Stable content-addressed key for this signature.
    pub fn fingerprint(&self) -> String {
        let canonical = format!(
            "{}|{}|{}",
            self.task_tokens.iter().cloned().collect::<Vec<_>>().join(","),
            self.error_category,
            self.files.iter().cloned().collect::<Vec<_>>().join(",")
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// A learned negative pattern: results matching this trigger get their
/// confidence suppressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InhibitoryPattern {
    pub fingerprint: String,
    pub signature: TriggerSignature,
    pub strength: f64,
    pub reinforcements: u64,
    pub last_reinforced: DateTime<Utc>,
    pub created: DateTime<Utc>,
}

impl InhibitoryPattern {
    pub fn new(signature: TriggerSignature, initial_strength: f64, now: DateTime<Utc>) -> Self {
        Self {
            fingerprint: signature.fingerprint(),
            signature,
            strength: initial_strength.clamp(0.0, 1.0),
            reinforcements: 1,
            last_reinforced: now,
            created: now,
        }
    }
}

/// Lowercase alphanumeric tokens of length >= 2, minus a tiny stopword set.
pub fn tokenize(text: &str) -> BTreeSet<String> {
    const STOPWORDS: &[&str] = &["the", "a", "an", "of", "in", "to", "for", "and", "or", "is"];
    text.split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|t| t.len() >= 2 && !STOPWORDS.contains(&t.as_str()))
        .collect()
}
