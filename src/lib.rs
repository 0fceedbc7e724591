#![warn(missing_docs)]

//!
//! A crate that grows ID3 decision trees.
//!
//! - Splitting criteria
//!     Attributes are chosen by information gain or gain ratio.
//!     Missing entries (`"-"`) are merged into the most frequent value
//!     of the attribute while scoring it.
//!     Ties among maximal scores are broken uniformly at random,
//!     driven by a seeded generator by default.
//!
//!
//! - Numeric attributes
//!     A numeric attribute is binarized by the threshold
//!     that maximizes the information gain.
//!     The fitted thresholds are kept by the classifier,
//!     so raw records can be classified.
//!
//!
//! - Evaluation
//!     `CrossValidation` generates k-fold train/test pairs
//!     and validates a learner over them in parallel.
//!
//! # Example
//! ```no_run
//! use id3tree::prelude::*;
//!
//! let dataset = DatasetReader::new()
//!     .file("/path/to/Autism-Adult-Data.arff")
//!     .read()
//!     .unwrap();
//! let (test, train) = dataset.holdout(0.2, 1234);
//!
//! let id3 = Id3Builder::new(&train)
//!     .target("Class/ASD")
//!     .numeric_attributes(["age", "result"])
//!     .build()
//!     .unwrap();
//! let f = id3.fit(&train).unwrap();
//! println!("{f}");
//! println!("test error: {}", f.validation_error(&test, "Class/ASD").unwrap());
//! ```

/// Constants shared by the modules.
pub mod constants;
/// The error type.
pub mod error;

pub mod sample;
pub mod tie_break;
pub mod metrics;

/// Attribute selection criteria.
pub mod split_by;
pub mod discretizer;

/// The ID3 algorithm and its classifier.
pub mod id3;

pub mod research;
pub mod prelude;


pub use error::{Id3Error, Result};

pub use sample::{
    Value,
    Record,
    Attribute,
    AttributeKind,
    Dataset,
    DatasetReader,
};

pub use tie_break::{
    TieBreak,
    TieBreakPolicy,
    RandomTie,
    FirstTie,
};

pub use split_by::SplitBy;
pub use discretizer::{Discretizer, Threshold};

pub use id3::{
    Id3,
    Id3Builder,
    Id3Classifier,
    Node,
    Branch,
};

pub use research::{
    CrossValidation,
    CrossValidationReport,
    FoldResult,
    ReportSink,
    FileReport,
    k_fold_validate,
};
