//! Error type for the normalization and join pipeline.
//!
//! Only *structural* problems are errors: a batch label without a derivable
//! extraction date, a target date or identifier that cannot be parsed, a JSON
//! document missing an expected key, or a lazy batch provider that failed.
//! Malformed quantities are never errors; they are coerced (see
//! [`coerce_numeric`](crate::transform::coerce_numeric)).
//!
//! Anything raised while a batch is being processed is wrapped into
//! [`EtlError::Batch`] so the caller learns which batch failed.

use thiserror::Error;

/// Errors raised by the pipeline.
#[derive(Debug, Error)]
pub enum EtlError {
    /// The label does not follow the configured `<name>_<yyyy>_<mm>_<dd>` convention.
    #[error("cannot derive extraction date from batch label `{label}`: {reason}")]
    BatchLabel { label: String, reason: String },

    /// A target date column held a value in none of the accepted formats.
    #[error("unparseable target date `{value}`")]
    TargetDate { value: String },

    /// A store or product number is not an integer.
    #[error("field `{field}` is not a valid identifier: `{value}`")]
    Identifier { field: &'static str, value: String },

    /// A JSON document is malformed or lacks an expected key.
    #[error("malformed document: {0}")]
    Document(#[from] serde_json::Error),

    /// A document envelope did not have the expected shape.
    #[error("unexpected document shape: {0}")]
    Shape(String),

    /// A deferred batch provider returned an error.
    #[error("batch provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The provider of a batch failed earlier and cannot be invoked again.
    #[error("batch provider already consumed by a failed load")]
    ProviderConsumed,

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Configuration could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps any error raised while processing the batch called `label`.
    #[error("batch `{label}`: {source}")]
    Batch {
        label: String,
        #[source]
        source: Box<EtlError>,
    },
}

impl EtlError {
    /// Attach the label of the batch that was being processed.
    ///
    /// Errors that already carry a label are returned unchanged.
    #[must_use]
    pub fn in_batch(self, label: &str) -> Self {
        match self {
            e @ EtlError::Batch { .. } => e,
            other => EtlError::Batch {
                label: label.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Label of the failing batch, if known.
    pub fn batch_label(&self) -> Option<&str> {
        match self {
            EtlError::Batch { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EtlError>;
