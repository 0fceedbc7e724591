//! Error type shared by every operation of this crate.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while reading data, growing a tree,
/// or validating a tree.
#[derive(Debug, Error)]
pub enum Id3Error {
    /// An impurity measure or a validation was asked
    /// to work on zero records.
    #[error("cannot compute {0} over an empty sample")]
    EmptySample(&'static str),

    /// The split information of the attribute is zero,
    /// so its gain ratio is undefined.
    #[error("split information of attribute `{0}` is zero")]
    DegenerateSplit(String),

    /// No midpoint separates two examples with different targets.
    #[error("no threshold candidate exists for numeric attribute `{0}`")]
    NoThresholdCandidate(String),

    /// A record reached a decision node through a value
    /// that was never observed while growing the tree.
    #[error("value `{value}` of attribute `{attribute}` was not seen during training")]
    UnseenBranchValue {
        /// Attribute tested at the decision node.
        attribute: String,
        /// Value held by the record.
        value: String,
    },

    /// The named attribute is not part of the record or the schema.
    #[error("attribute `{0}` does not exist")]
    UnknownAttribute(String),

    /// A numeric attribute holds a nominal value.
    #[error("attribute `{attribute}` holds the non-numeric value `{value}`")]
    NotNumeric {
        /// Attribute name.
        attribute: String,
        /// Offending value.
        value: String,
    },

    /// A record does not carry exactly the attributes of the dataset.
    #[error("record {row} does not match the schema: {reason}")]
    SchemaMismatch {
        /// Zero-based position of the record.
        row: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// The target attribute was not given to the builder.
    #[error("target attribute is not set")]
    MissingTarget,

    /// The attribute selector was called without candidates.
    #[error("no candidate attribute to split on")]
    NoCandidate,

    /// The number of folds does not fit the sample.
    #[error("cannot split {n_sample} records into {n_folds} folds")]
    InvalidFolds {
        /// Requested folds.
        n_folds: usize,
        /// Number of records.
        n_sample: usize,
    },

    /// Malformed input file.
    #[error("line {line}: {reason}")]
    Parse {
        /// One-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failure raised by polars while converting a data frame.
    #[error(transparent)]
    Polars(#[from] PolarsError),

    /// JSON (de)serialization failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}


/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Id3Error>;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Id3Error::NoThresholdCandidate("age".to_string());
        assert!(err.to_string().contains("`age`"));

        let err = Id3Error::UnseenBranchValue {
            attribute: "Horario".to_string(),
            value: "Vespertino".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Horario") && msg.contains("Vespertino"));

        let err = Id3Error::InvalidFolds { n_folds: 10, n_sample: 3 };
        assert!(err.to_string().contains("10 folds"));
    }
}
