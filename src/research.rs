//! This directory provides tools for evaluating ID3 trees.
//! - k-fold cross validation, run fold-parallel
//! - Reports of per-fold errors and their mean

/// Provides the fold generator and k-fold validation.
pub mod cross_validation;

/// Defines the report and its sinks.
pub mod report;


pub use cross_validation::{CrossValidation, k_fold_validate};
pub use report::{
    CrossValidationReport,
    FoldResult,
    ReportSink,
    FileReport,
};
