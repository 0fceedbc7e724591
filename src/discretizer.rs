//! Binarization of numeric attributes.
//!
//! Each numeric attribute is replaced by `1` (value above the threshold)
//! or `0` (otherwise), where the threshold is the midpoint between
//! two adjacent sorted values that maximizes the information gain.

use colored::Colorize;
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::{Dataset, Record, Value};
use crate::metrics::information_gain;
use crate::tie_break::{self, TieBreak};
use crate::error::{Id3Error, Result};


/// A split point of a numeric attribute,
/// paired with the information gain it produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    /// The binarized attribute.
    pub attribute: String,
    /// Midpoint between two adjacent sorted values.
    pub value: f64,
    /// Information gain of the binarized attribute.
    pub gain: f64,
}


impl Threshold {
    /// Binarize `value` with this threshold.
    #[inline]
    pub fn apply(&self, value: &Value) -> Value {
        binarize(value, self.value)
    }
}


impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} > {:.4} (gain {:.4})",
            self.attribute, self.value, self.gain,
        )
    }
}


/// Returns `1` if `value` is greater than `threshold`, `0` otherwise.
/// Missing and nominal values are returned unchanged.
#[inline]
pub fn binarize(value: &Value, threshold: f64) -> Value {
    match value {
        Value::Numeric(x) => {
            Value::Numeric(if *x > threshold { 1f64 } else { 0f64 })
        },
        other => other.clone(),
    }
}


/// Replaces numeric attributes by their best binarization.
///
/// # Example
/// ```no_run
/// use id3tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("Autism-Adult-Data.arff")
///     .read()
///     .unwrap();
/// let mut tie = RandomTie::seed(1234);
/// let (binarized, thresholds) = Discretizer::new("Class/ASD")
///     .attributes(["age", "result"])
///     .fit(&dataset, &mut tie)
///     .unwrap();
/// for threshold in thresholds {
///     println!("{threshold}");
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Discretizer {
    target: String,
    attributes: Vec<String>,
    skip_constant: bool,
    verbose: bool,
}


impl Discretizer {
    /// Construct a new instance of `Discretizer`
    /// for the given target attribute.
    pub fn new<S: Into<String>>(target: S) -> Self {
        Self {
            target: target.into(),
            attributes: Vec::new(),
            skip_constant: false,
            verbose: false,
        }
    }


    /// Set the numeric attributes to binarize.
    #[inline]
    pub fn attributes<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        self.attributes = names.into_iter().map(Into::into).collect();
        self
    }


    /// If `true`, an attribute without any threshold candidate
    /// is left unchanged instead of raising
    /// `Id3Error::NoThresholdCandidate`.
    /// Default is `false`.
    #[inline]
    pub fn skip_constant(mut self, flag: bool) -> Self {
        self.skip_constant = flag;
        self
    }


    /// Print the chosen thresholds.
    /// Default is `false`.
    #[inline]
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }


    /// Returns the attributes this discretizer binarizes.
    #[inline]
    pub fn numeric_attributes(&self) -> &[String] {
        &self.attributes[..]
    }


    /// Returns the threshold candidates of `attribute`:
    /// midpoints between adjacent sorted values whose targets
    /// and values both differ. Missing entries are ignored.
    pub fn candidates(&self, dataset: &Dataset, attribute: &str)
        -> Result<Vec<f64>>
    {
        let mut pairs = Vec::with_capacity(dataset.len());
        for record in dataset.records() {
            let value = record.value(attribute)?;
            if value.is_missing() { continue; }
            let x = value.as_f64()
                .ok_or_else(|| Id3Error::NotNumeric {
                    attribute: attribute.to_string(),
                    value: value.to_string(),
                })?;
            pairs.push((x, record.value(&self.target)?));
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut thresholds = pairs.windows(2)
            .filter_map(|w| {
                let (x1, y1) = w[0];
                let (x2, y2) = w[1];
                (y1 != y2 && x1 != x2).then_some((x1 + x2) / 2f64)
            })
            .collect::<Vec<_>>();
        thresholds.dedup();
        Ok(thresholds)
    }


    /// Returns the best binarization of `attribute`
    /// together with the binarized column.
    fn best_split<B>(&self, dataset: &Dataset, attribute: &str, tie: &mut B)
        -> Result<Option<(Threshold, Vec<Value>)>>
        where B: TieBreak + ?Sized
    {
        let thresholds = self.candidates(dataset, attribute)?;

        let mut best_gain = f64::NEG_INFINITY;
        let mut tied: Vec<(Threshold, Vec<Value>)> = Vec::new();
        for value in thresholds {
            // Each trial works on its own projected copy.
            let column = dataset.records()
                .iter()
                .map(|record| record.value(attribute).map(|v| binarize(v, value)))
                .collect::<Result<Vec<_>>>()?;
            let trial = dataset.records()
                .iter()
                .zip(column.iter())
                .map(|(record, x)| {
                    let y = record.value(&self.target)?.clone();
                    Ok(Record::new().with(attribute, x.clone()).with(self.target.as_str(), y))
                })
                .collect::<Result<Vec<_>>>()?;
            let view = trial.iter().collect::<Vec<_>>();
            let gain = information_gain(&view, attribute, &self.target, tie)?;

            let threshold = Threshold {
                attribute: attribute.to_string(),
                value,
                gain,
            };
            if gain > best_gain || tied.is_empty() {
                best_gain = gain;
                tied.clear();
                tied.push((threshold, column));
            } else if gain == best_gain {
                tied.push((threshold, column));
            }
        }

        let n_tied = tied.len();
        let index = (0..n_tied).collect::<Vec<_>>();
        let best = tie_break::pick(tie, &index)
            .copied()
            .map(|k| tied.swap_remove(k));
        Ok(best)
    }


    /// Binarize every configured attribute, in order.
    ///
    /// Returns a fresh copy of `dataset` holding the binarized values
    /// and the chosen thresholds. `dataset` itself is never modified.
    pub fn fit<B>(&self, dataset: &Dataset, tie: &mut B)
        -> Result<(Dataset, Vec<Threshold>)>
        where B: TieBreak + ?Sized
    {
        dataset.attribute(&self.target)?;

        let mut working = dataset.clone();
        let mut thresholds = Vec::with_capacity(self.attributes.len());
        for attribute in self.attributes.iter() {
            working.attribute(attribute)?;
            match self.best_split(&working, attribute, tie)? {
                Some((threshold, column)) => {
                    if self.verbose {
                        println!(
                            "{}    {}",
                            format!("  [{attribute: >16}]").bold().red(),
                            format!("{threshold}").bold().green(),
                        );
                    }
                    working = working.with_column(attribute, column)?;
                    thresholds.push(threshold);
                },
                None if self.skip_constant => {
                    if self.verbose {
                        println!(
                            "{}    {}",
                            format!("  [{attribute: >16}]").bold().red(),
                            "no threshold candidate, left unchanged".bold().yellow(),
                        );
                    }
                },
                None => {
                    return Err(Id3Error::NoThresholdCandidate(attribute.clone()));
                },
            }
        }
        Ok((working, thresholds))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::tie_break::{FirstTie, RandomTie};

    fn sample(xs: &[f64], ys: &[&str]) -> Dataset {
        let records = xs.iter()
            .zip(ys)
            .map(|(x, y)| Record::new().with("x", *x).with("y", *y))
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_candidates() {
        let data = sample(
            &[40.0, 48.0, 60.0, 72.0, 80.0, 90.0],
            &["No", "No", "Yes", "Yes", "Yes", "No"],
        );
        let res = Discretizer::new("y").candidates(&data, "x").unwrap();
        let exp = vec![54.0, 85.0];
        assert_eq!(exp, res, "expected {exp:?}, got {res:?}.");
    }

    #[test]
    fn test_equal_values_are_no_candidate() {
        let data = sample(&[1.0, 1.0, 2.0], &["No", "Yes", "Yes"]);
        let res = Discretizer::new("y").candidates(&data, "x").unwrap();
        assert!(res.is_empty(), "got {res:?}.");
    }

    #[test]
    fn test_best_threshold() {
        let data = sample(
            &[40.0, 48.0, 60.0, 72.0, 80.0, 90.0],
            &["No", "No", "Yes", "Yes", "Yes", "No"],
        );
        let (binarized, thresholds) = Discretizer::new("y")
            .attributes(["x"])
            .fit(&data, &mut RandomTie::seed(3))
            .unwrap();

        assert_eq!(thresholds.len(), 1);
        assert_eq!(thresholds[0].value, 54.0);

        let column = binarized.column("x").unwrap();
        let exp = [0.0, 0.0, 1.0, 1.0, 1.0, 1.0].map(Value::from);
        let exp = exp.iter().collect::<Vec<_>>();
        assert_eq!(exp, column, "expected {exp:?}, got {column:?}.");

        // The input is left untouched.
        assert_eq!(data[0]["x"], Value::from(40.0));
    }

    #[test]
    fn test_binary_attribute_splits_at_half() {
        let data = sample(
            &[0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            &["No", "Yes", "No", "Yes", "Yes", "No", "Yes"],
        );
        for seed in 0..8 {
            let (binarized, thresholds) = Discretizer::new("y")
                .attributes(["x"])
                .fit(&data, &mut RandomTie::seed(seed))
                .unwrap();
            assert_eq!(thresholds[0].value, 0.5);
            assert_eq!(binarized, data);
        }
    }

    #[test]
    fn test_no_threshold_candidate() {
        let data = sample(&[3.0, 3.0, 3.0], &["No", "Yes", "No"]);
        let res = Discretizer::new("y")
            .attributes(["x"])
            .fit(&data, &mut FirstTie);
        assert!(matches!(res, Err(Id3Error::NoThresholdCandidate(a)) if a == "x"));

        let (binarized, thresholds) = Discretizer::new("y")
            .attributes(["x"])
            .skip_constant(true)
            .fit(&data, &mut FirstTie)
            .unwrap();
        assert!(thresholds.is_empty());
        assert_eq!(binarized, data);
    }

    #[test]
    fn test_nominal_value_is_rejected() {
        let records = vec![
            Record::new().with("x", 1.0).with("y", "No"),
            Record::new().with("x", "high").with("y", "Yes"),
        ];
        let data = Dataset::from_records(records).unwrap();
        let res = Discretizer::new("y").attributes(["x"]).fit(&data, &mut FirstTie);
        assert!(matches!(res, Err(Id3Error::NotNumeric { .. })));
    }

    #[test]
    fn test_missing_values_stay_missing() {
        let records = vec![
            Record::new().with("x", 10.0).with("y", "No"),
            Record::new().with("x", Value::missing()).with("y", "Yes"),
            Record::new().with("x", 30.0).with("y", "Yes"),
        ];
        let data = Dataset::from_records(records).unwrap();
        let (binarized, thresholds) = Discretizer::new("y")
            .attributes(["x"])
            .fit(&data, &mut FirstTie)
            .unwrap();
        assert_eq!(thresholds[0].value, 20.0);
        assert!(binarized[1]["x"].is_missing());
        assert_eq!(binarized[2]["x"], Value::from(1));
    }
}
