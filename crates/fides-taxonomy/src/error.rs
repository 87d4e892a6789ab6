use thiserror::Error;

/// Structural problems found while ingesting taxonomy records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaxonomyError {
    #[error("record #{index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("invalid fides key `{key}`: {reason}")]
    InvalidKey { key: String, reason: String },

    #[error("`{key}` references parent `{parent_key}`, which is not declared before it")]
    ParentNotFound { key: String, parent_key: String },

    #[error("`{key}` is declared more than once (records #{first} and #{second})")]
    DuplicateKey {
        key: String,
        first: usize,
        second: usize,
    },

    #[error("parent chain forms a cycle: {}", cycle.join(" -> "))]
    CyclicHierarchy { cycle: Vec<String> },

    #[error("`{key}` declares parent `{parent_key}` but its dot-prefix is `{expected}`")]
    ParentKeyMismatch {
        key: String,
        parent_key: String,
        expected: String,
    },

    #[error("unknown resource type `{0}` (expected data_category|data_use|data_qualifier|data_subject)")]
    UnknownResourceType(String),
}
