//! Error types for PrizeForge

use thiserror::Error;

/// Core error type
#[derive(Error, Debug)]
pub enum PfError {
    #[error("Prize category specifications must contain at least one category")]
    EmptySpecs,

    #[error("Probability share {share} for category '{category}' must be between 0 and 1")]
    ShareOutOfRange { category: String, share: f64 },

    #[error("Prize count for category '{category}' must be greater than 0")]
    InvalidPrizeCount { category: String },

    #[error("Category '{category}' declares {declared} prizes but names {named}")]
    PrizeNameCountMismatch {
        category: String,
        declared: u32,
        named: usize,
    },

    #[error("Category '{category}' needs a prize count or prize names")]
    MissingPrizes { category: String },

    #[error("Category '{category}' has {count} prizes, more than a table can index")]
    TooManyPrizes { category: String, count: usize },

    #[error("Prize category name must not be blank")]
    BlankCategoryName,

    #[error("Prize names for category '{0}' must have at least one entry")]
    EmptyPrizeNames(String),

    #[error("At least one selection domain is required")]
    NoDomains,

    #[error("Selection domain '{domain}' is invalid: {reason}")]
    InvalidDomain { domain: String, reason: String },

    #[error("Result tables have different schemas: {0}")]
    SchemaMismatch(String),

    #[error("Success criteria has {criteria} entries but the result table has {table} rows")]
    CriteriaSizeMismatch { criteria: usize, table: usize },

    #[error("Success criteria has no entry for prize index {0}")]
    MissingCriteriaIndex(usize),

    #[error("Subset size {subset_size} must be smaller than the {required} prizes with a non-zero requirement")]
    SubsetTooLarge { subset_size: usize, required: usize },

    #[error("Repetitions must be between 1 and {max}, got {requested}")]
    RepetitionsOutOfRange { requested: u32, max: u32 },

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PfError {
    /// Whether the error comes from a malformed or out-of-range caller input
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, PfError::Io(_) | PfError::Json(_))
    }

    /// Invalid domain error naming the offending domain
    pub fn invalid_domain(domain: &str, reason: impl Into<String>) -> Self {
        PfError::InvalidDomain {
            domain: domain.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias
pub type PfResult<T> = Result<T, PfError>;
