//! Exports the types needed to read data, grow a tree and validate it.
//!
pub use crate::sample::{
    Value,
    Record,
    Dataset,
    DatasetReader,
};


pub use crate::tie_break::{
    TieBreak,
    TieBreakPolicy,
    RandomTie,
    FirstTie,
};


pub use crate::split_by::SplitBy;
pub use crate::discretizer::{Discretizer, Threshold};


pub use crate::id3::{
    Id3,
    Id3Builder,
    Id3Classifier,
    Node,
};


pub use crate::research::{
    CrossValidation,
    CrossValidationReport,
    ReportSink,
    FileReport,
    k_fold_validate,
};


pub use crate::error::Id3Error;
