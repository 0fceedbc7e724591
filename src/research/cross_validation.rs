use rand::prelude::*;
use rayon::prelude::*;
use colored::Colorize;

use crate::{
    constants::{DEFAULT_N_FOLDS, DEFAULT_SEED, PRINT_WIDTH},
    id3::{Id3, Id3Builder},
    sample::Dataset,
    split_by::SplitBy,
    error::{Id3Error, Result},
};
use super::report::{CrossValidationReport, FoldResult, ReportSink};


/// A struct that generates
/// pairs of training/test datasets for k-fold cross validation.
///
/// The records are cut into `k` order-preserving chunks;
/// the first `n mod k` chunks hold one extra record.
/// The `i`th pair holds the `i`th chunk as the test part
/// and the remaining chunks, in order, as the training part.
///
/// # Example
/// ```no_run
/// use id3tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("/path/to/data/file.arff")
///     .read()
///     .unwrap();
/// let id3 = Id3Builder::new(&dataset)
///     .target("class")
///     .split_by(SplitBy::GainRatio)
///     .build()
///     .unwrap();
///
/// let cv = CrossValidation::new(&dataset)
///     .n_folds(10)
///     .verbose(true)
///     .seed(777)
///     .shuffle();
/// for (train, test) in cv.clone() {
///     let f = id3.fit(&train).unwrap();
///     let loss = f.validation_error(&test, "class").unwrap();
///     println!("[test: {loss}]");
/// }
///
/// let mut sink = FileReport::default();
/// let report = cv.validate_with(&id3, &mut sink).unwrap();
/// println!("mean error: {}", report.mean_error);
/// ```
#[derive(Clone)]
pub struct CrossValidation<'a> {
    current_fold: usize,
    n_folds: usize,
    seed: u64,
    dataset: &'a Dataset,
    ix: Vec<usize>,
    verbose: bool,
}


impl<'a> CrossValidation<'a> {
    /// Construct a new instance of `CrossValidation.`
    #[inline]
    pub fn new(dataset: &'a Dataset) -> Self {
        let ix = (0..dataset.len()).collect::<Vec<_>>();
        Self {
            current_fold: 0,
            n_folds: DEFAULT_N_FOLDS,
            seed: DEFAULT_SEED,
            verbose: false,
            dataset,
            ix,
        }
    }


    /// Set the number of folds.
    /// Default value is `5.`
    /// The number of folds must lie in `2..=n` for `n` records.
    #[inline]
    pub fn n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }


    /// Set the seed of the randomness for shuffling.
    /// Default value is `1234.`
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }


    /// Set the verbose parameter.
    /// If `true`, `CrossValidation` prints some information
    /// when generating a train/test pair or finishing a fold.
    /// Default value is `false.`
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Shuffle the records before cutting them into folds.
    /// By default, `CrossValidation` keeps the order of the dataset.
    #[inline]
    pub fn shuffle(mut self) -> Self {
        let mut rng = StdRng::seed_from_u64(self.seed);
        self.ix.shuffle(&mut rng);
        self
    }


    /// Returns `Id3Error::InvalidFolds` unless `2 <= k <= n`.
    pub fn check(&self) -> Result<()> {
        let n_sample = self.dataset.len();
        if self.n_folds < 2 || self.n_folds > n_sample {
            return Err(Id3Error::InvalidFolds {
                n_folds: self.n_folds,
                n_sample,
            });
        }
        Ok(())
    }


    /// Returns the positions `start..end` of the `i`th fold.
    #[inline]
    fn bounds(&self, i: usize) -> (usize, usize) {
        let n_sample = self.dataset.len();
        let size = n_sample / self.n_folds;
        let rest = n_sample % self.n_folds;
        let start = i * size + i.min(rest);
        let end = start + size + (i < rest) as usize;
        (start, end)
    }


    /// Returns the training/test datasets for `i`th fold.
    #[inline]
    fn fold_at(&self, i: usize) -> (Dataset, Dataset) {
        let (start, end) = self.bounds(i);
        let test = self.dataset.subset(&self.ix[start..end]);
        let train = self.ix[..start].iter()
            .chain(self.ix[end..].iter())
            .copied()
            .collect::<Vec<_>>();
        let train = self.dataset.subset(&train);
        (train, test)
    }


    /// Run k-fold cross validation of `learner`.
    ///
    /// The folds are trained in parallel.
    /// Fold `i` grows its tree with the tie breaking policy
    /// `learner.tie_break().for_fold(i)`.
    pub fn validate(&self, learner: &Id3) -> Result<CrossValidationReport> {
        self.check()?;

        let folds = (0..self.n_folds).into_par_iter()
            .map(|i| {
                let (train, test) = self.fold_at(i);
                let policy = learner.tie_break().for_fold(i);
                let learner = learner.quiet().with_tie_break(policy);

                let f = learner.fit(&train)?;
                let error = f.validation_error(&test, learner.target())?;
                Ok(FoldResult {
                    fold: i,
                    error,
                    n_train: train.len(),
                    n_test: test.len(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let report = CrossValidationReport::new(folds);
        if self.verbose {
            for fold in report.folds.iter() {
                println!(
                    "{}    {}    {}    {}",
                    format!("  [{: >3}'th fold]", fold.fold + 1).bold().red(),
                    format!("[TRAIN {:>PRINT_WIDTH$}]", fold.n_train).bold().green(),
                    format!("[TEST {:>PRINT_WIDTH$}]", fold.n_test).bold().yellow(),
                    format!("[ERROR {:>PRINT_WIDTH$.4}]", fold.error).bold().yellow(),
                );
            }
            println!(
                "{}",
                format!("  [MEAN ERROR {:>PRINT_WIDTH$.4}]", report.mean_error)
                    .bold()
                    .green(),
            );
        }
        Ok(report)
    }


    /// Run k-fold cross validation of `learner`
    /// and emit the report to `sink`.
    pub fn validate_with<S>(&self, learner: &Id3, sink: &mut S)
        -> Result<CrossValidationReport>
        where S: ReportSink + ?Sized
    {
        let report = self.validate(learner)?;
        sink.emit(&report)?;
        Ok(report)
    }
}


impl<'a> Iterator for CrossValidation<'a> {
    type Item = (Dataset, Dataset);
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_fold >= self.n_folds { return None; }
        // An invalid number of folds yields nothing.
        self.check().ok()?;

        let output = self.fold_at(self.current_fold);
        self.current_fold += 1;

        if self.verbose {
            let train_size = output.0.len();
            let test_size = output.1.len();
            println!(
                "{}    {}    {}",
                format!("  [{: >3}'th fold]", self.current_fold).bold().red(),
                format!("[TRAIN {:>PRINT_WIDTH$}]", train_size).bold().green(),
                format!("[TEST {:>PRINT_WIDTH$}]", test_size).bold().yellow(),
            );
        }

        Some(output)
    }
}


/// Returns the mean validation error of k-fold cross validation
/// of ID3 with `SplitBy::GainRatio` over `dataset`, in record order.
pub fn k_fold_validate<I, S>(
    dataset: &Dataset,
    attributes: I,
    target: &str,
    n_folds: usize,
) -> Result<f64>
    where I: IntoIterator<Item = S>,
          S: Into<String>,
{
    let id3 = Id3Builder::new(dataset)
        .target(target)
        .attributes(attributes)
        .split_by(SplitBy::GainRatio)
        .build()?;
    let report = CrossValidation::new(dataset)
        .n_folds(n_folds)
        .validate(&id3)?;
    Ok(report.mean_error)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Record, Value};

    fn sample(n: usize) -> Dataset {
        let records = (0..n)
            .map(|i| {
                Record::new()
                    .with("id", i as f64)
                    .with("parity", if i % 2 == 0 { "even" } else { "odd" })
                    .with("y", if i % 2 == 0 { "A" } else { "B" })
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_fold_sizes() {
        let data = sample(11);
        let sizes = CrossValidation::new(&data)
            .n_folds(4)
            .map(|(train, test)| {
                assert_eq!(train.len() + test.len(), 11);
                test.len()
            })
            .collect::<Vec<_>>();
        assert_eq!(sizes, vec![3, 3, 3, 2]);
    }

    #[test]
    fn test_folds_preserve_order() {
        let data = sample(6);
        let folds = CrossValidation::new(&data)
            .n_folds(3)
            .collect::<Vec<_>>();
        let (train, test) = &folds[1];
        assert_eq!(test[0]["id"], Value::from(2));
        assert_eq!(test[1]["id"], Value::from(3));
        let ids = train.column("id").unwrap();
        let exp = [0, 1, 4, 5].map(Value::from);
        let exp = exp.iter().collect::<Vec<_>>();
        assert_eq!(ids, exp, "expected {exp:?}, got {ids:?}.");
    }

    #[test]
    fn test_shuffle_keeps_every_record() {
        let data = sample(10);
        let mut ids = CrossValidation::new(&data)
            .n_folds(5)
            .seed(7)
            .shuffle()
            .flat_map(|(_, test)| {
                test.records()
                    .iter()
                    .map(|r| r["id"].clone())
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        ids.sort();
        let exp = (0..10).map(Value::from).collect::<Vec<_>>();
        assert_eq!(ids, exp);
    }

    #[test]
    fn test_invalid_folds() {
        let data = sample(3);
        for k in [0, 1, 4] {
            let cv = CrossValidation::new(&data).n_folds(k);
            assert!(matches!(cv.check(), Err(Id3Error::InvalidFolds { .. })));
            assert_eq!(cv.count(), 0);
        }
    }

    #[test]
    fn test_validate_separable_sample() {
        let data = sample(12);
        let id3 = Id3Builder::new(&data)
            .target("y")
            .attributes(["parity"])
            .build()
            .unwrap();
        let report = CrossValidation::new(&data)
            .n_folds(3)
            .validate(&id3)
            .unwrap();
        assert_eq!(report.n_folds, 3);
        assert_eq!(report.mean_error, 0f64);
        let n_test = report.folds.iter().map(|f| f.n_test).sum::<usize>();
        assert_eq!(n_test, 12);
    }

    #[test]
    fn test_k_fold_validate() {
        let data = sample(8);
        let err = k_fold_validate(&data, ["parity"], "y", 4).unwrap();
        assert_eq!(err, 0f64);

        let res = k_fold_validate(&data, ["parity"], "y", 9);
        assert!(matches!(res, Err(Id3Error::InvalidFolds { n_folds: 9, n_sample: 8 })));
    }
}
