// Single source of truth for all default tuning values.

// --- Activation ---
pub const DEFAULT_ACTIVATION_LEVELS: usize = 3;
pub const DEFAULT_PROPAGATION_DECAY: f64 = 0.5;
pub const DEFAULT_CONVERGENCE_EPSILON: f64 = 1e-4;
pub const DEFAULT_ACTIVATION_WEIGHT: f64 = 0.7;
pub const DEFAULT_CONFIDENCE_WEIGHT: f64 = 0.3;

// --- Seed match scores ---
pub const SEED_EXACT_MATCH: f64 = 1.0;
pub const SEED_CASE_INSENSITIVE_MATCH: f64 = 0.9;
pub const SEED_NAME_SUBSTRING: f64 = 0.7;
pub const SEED_PATH_SUBSTRING: f64 = 0.5;

// --- Fusion ---
pub const DEFAULT_CONFLICT_VARIANCE_THRESHOLD: f64 = 0.04;
pub const DEFAULT_CONFLICT_PENALTY: f64 = 0.25;

// --- Hebbian ---
pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_HEBBIAN_DECAY_RATE: f64 = 0.05;
pub const DEFAULT_PRUNE_EPSILON: f64 = 0.01;

// --- Inhibition ---
pub const DEFAULT_INITIAL_PATTERN_STRENGTH: f64 = 0.4;
pub const DEFAULT_REINFORCEMENT_RATE: f64 = 0.25;
pub const DEFAULT_INHIBITION_DECAY_RATE: f64 = 0.05;
pub const DEFAULT_CONFIDENCE_FLOOR: f64 = 0.05;
pub const DEFAULT_PATTERN_NODE_THRESHOLD: u64 = 3;

// --- Temporal ---
pub const DEFAULT_CO_OCCURRENCE_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_CO_OCCURRENCE_PAIR_CAP: usize = 5;
pub const DEFAULT_MAX_TEMPORAL_SNAPSHOTS: usize = 64;

// --- Cache ---
pub const DEFAULT_CACHE_BUDGET_BYTES: usize = 4_194_304; // 4 MB

// --- Query pipeline ---
pub const DEFAULT_RESULT_LIMIT: usize = 10;
pub const DEFAULT_HEBBIAN_BASE_STRENGTH: f64 = 0.5;
pub const DEFAULT_METHOD_TIMEOUT_MS: u64 = 2_000;

// --- Observability ---
pub const DEFAULT_QUERY_LOG_CAPACITY: usize = 10_000;
pub const DEFAULT_LOG_LEVEL: &str = "info";

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "axon.db";
