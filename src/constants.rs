/// The nominal value that marks a missing entry.
pub const MISSING_VALUE: &str = "-";
/// Token for missing entries in ARFF/CSV files.
pub const MISSING_TOKEN: &str = "?";

/// Seed used when no seed is given.
pub const DEFAULT_SEED: u64 = 1234;
/// Number of folds used by `CrossValidation` by default.
pub const DEFAULT_N_FOLDS: usize = 5;

/// Width of the numeric columns printed in verbose mode.
pub const PRINT_WIDTH: usize = 9;
/// Default name of the cross validation report file.
pub const REPORT_FILE: &str = "cross-validation-results.txt";
