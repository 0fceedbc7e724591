use serde::{Serialize, Deserialize};

use std::fmt;
use std::fs::OpenOptions;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use crate::constants::REPORT_FILE;
use crate::error::Result;


/// The outcome of one fold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoldResult {
    /// Zero-based fold index.
    pub fold: usize,
    /// Validation error on the held-out fold.
    pub error: f64,
    /// Number of training records.
    pub n_train: usize,
    /// Number of held-out records.
    pub n_test: usize,
}


/// The outcome of a k-fold cross validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidationReport {
    /// Number of folds.
    pub n_folds: usize,
    /// Per-fold results in fold order.
    pub folds: Vec<FoldResult>,
    /// Mean of the per-fold errors.
    pub mean_error: f64,
}


impl CrossValidationReport {
    /// Collect the fold results. `folds` is sorted by fold index.
    pub fn new(mut folds: Vec<FoldResult>) -> Self {
        folds.sort_by_key(|fold| fold.fold);
        let n_folds = folds.len();
        let mean_error = if n_folds == 0 {
            0f64
        } else {
            folds.iter().map(|fold| fold.error).sum::<f64>() / n_folds as f64
        };
        Self { n_folds, folds, mean_error }
    }
}


impl fmt::Display for CrossValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-fold cross-validation", self.n_folds)?;
        for fold in self.folds.iter() {
            write!(
                f,
                "\nError rate of fold {}: {} over a validation set of size: {}",
                fold.fold, fold.error, fold.n_test,
            )?;
        }
        write!(f, "\n\nMean error: {}", self.mean_error)
    }
}


/// A destination of cross validation reports.
pub trait ReportSink {
    /// Emit `report`.
    fn emit(&mut self, report: &CrossValidationReport) -> Result<()>;
}


/// Discards every report.
impl ReportSink for () {
    #[inline]
    fn emit(&mut self, _report: &CrossValidationReport) -> Result<()> {
        Ok(())
    }
}


/// Keeps every report in memory.
impl ReportSink for Vec<CrossValidationReport> {
    #[inline]
    fn emit(&mut self, report: &CrossValidationReport) -> Result<()> {
        self.push(report.clone());
        Ok(())
    }
}


/// Appends reports to a text file.
/// The file is created if it does not exist.
#[derive(Debug, Clone)]
pub struct FileReport {
    path: PathBuf,
}


impl FileReport {
    /// Construct a new instance of `FileReport`.
    #[inline]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }


    /// Returns the path of the report file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}


impl Default for FileReport {
    fn default() -> Self {
        Self::new(REPORT_FILE)
    }
}


impl ReportSink for FileReport {
    fn emit(&mut self, report: &CrossValidationReport) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let line = format!("\n{}\n{report}", "-".repeat(60));
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}
