use colored::Colorize;
use fixedbitset::FixedBitSet;

use std::borrow::Cow;
use std::fmt;

use crate::{
    constants::PRINT_WIDTH,
    discretizer::Discretizer,
    metrics::{self, majority},
    sample::{Dataset, Record},
    split_by::SplitBy,
    tie_break::{TieBreak, TieBreakPolicy},
    error::{Id3Error, Result},
};

use super::{
    node::*,
    classifier::Id3Classifier,
};


/// The ID3 algorithm.
/// Given a set of labeled records, [`Id3`] grows a decision tree
/// that tests one attribute per level, branching once per observed value,
/// and outputs the classifier [`Id3Classifier`].
///
/// The algorithm is described in:
/// J. R. Quinlan, *Induction of decision trees*, Machine Learning 1 (1986).
///
/// Numeric attributes are binarized by a [`Discretizer`] before growing.
/// [`Id3`] is constructed by [`Id3Builder`](crate::id3::Id3Builder).
///
/// # Example
/// ```no_run
/// use id3tree::prelude::*;
///
/// let dataset = DatasetReader::new()
///     .file("/path/to/data/file.csv")
///     .has_header(true)
///     .read()
///     .unwrap();
///
/// let id3 = Id3Builder::new(&dataset)
///     .target("class")
///     .split_by(SplitBy::GainRatio)
///     .seed(777)
///     .build()
///     .unwrap();
///
/// let f = id3.fit(&dataset).unwrap();
/// println!("{f}");
///
/// let loss = f.validation_error(&dataset, "class").unwrap();
/// println!("loss (train) is: {loss}");
/// ```
#[derive(Debug, Clone)]
pub struct Id3 {
    target:      String,
    attributes:  Vec<String>,
    discretizer: Option<Discretizer>,
    split_by:    SplitBy,
    tie_break:   TieBreakPolicy,
    verbose:     bool,
}


impl Id3 {
    /// Initialize [`Id3`].
    /// This method is called only via `Id3Builder::build`.
    #[inline]
    pub(super) fn new(
        target:      String,
        attributes:  Vec<String>,
        discretizer: Option<Discretizer>,
        split_by:    SplitBy,
        tie_break:   TieBreakPolicy,
        verbose:     bool,
    ) -> Self
    {
        Self { target, attributes, discretizer, split_by, tie_break, verbose, }
    }


    /// Returns the name of this algorithm.
    pub fn name(&self) -> &str {
        match self.discretizer {
            Some(_) => "ID3 (numeric thresholds)",
            None => "ID3",
        }
    }


    /// Returns the name/value pairs of the parameters.
    pub fn info(&self) -> Vec<(&str, String)> {
        let numeric = self.discretizer.as_ref()
            .map(|d| d.numeric_attributes().join(", "))
            .unwrap_or_else(|| "-".to_string());
        Vec::from([
            ("Target", self.target.clone()),
            ("# of attributes", format!("{}", self.attributes.len())),
            ("Numeric attributes", numeric),
            ("Split by", format!("{}", self.split_by)),
            ("Tie break", format!("{}", self.tie_break)),
        ])
    }


    /// Returns the target attribute.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }


    /// Returns the candidate attributes.
    #[inline]
    pub fn attributes(&self) -> &[String] {
        &self.attributes[..]
    }


    /// Returns the splitting criterion.
    #[inline]
    pub fn split_by(&self) -> SplitBy {
        self.split_by
    }


    /// Returns the tie breaking policy.
    #[inline]
    pub fn tie_break(&self) -> TieBreakPolicy {
        self.tie_break
    }


    /// Returns a copy of `self` using the given tie breaking policy.
    pub fn with_tie_break(&self, tie_break: TieBreakPolicy) -> Self {
        Self { tie_break, ..self.clone() }
    }


    /// Returns a copy of `self` that does not print anything.
    pub(crate) fn quiet(&self) -> Self {
        let discretizer = self.discretizer.clone()
            .map(|discretizer| discretizer.verbose(false));
        Self { discretizer, verbose: false, ..self.clone() }
    }


    /// Grow a tree over `dataset`.
    /// A fresh tie breaker is instantiated from the policy,
    /// so the result is reproducible for seeded policies.
    pub fn fit(&self, dataset: &Dataset) -> Result<Id3Classifier> {
        let mut tie = self.tie_break.tie_breaker();
        self.fit_with(dataset, tie.as_mut())
    }


    /// Grow a tree over `dataset`, breaking ties with `tie`.
    pub fn fit_with<B>(&self, dataset: &Dataset, tie: &mut B)
        -> Result<Id3Classifier>
        where B: TieBreak + ?Sized
    {
        if dataset.is_empty() {
            return Err(Id3Error::EmptySample("ID3"));
        }
        dataset.attribute(&self.target)?;
        for name in self.attributes.iter() {
            dataset.attribute(name)?;
        }

        let (working, thresholds) = match &self.discretizer {
            Some(discretizer) => {
                let (binarized, thresholds) = discretizer.fit(dataset, tie)?;
                (Cow::Owned(binarized), thresholds)
            },
            None => (Cow::Borrowed(dataset), Vec::new()),
        };

        let candidates = self.attributes.iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>();
        let mut alive = FixedBitSet::with_capacity(candidates.len());
        alive.insert_range(..);

        let root = self.grow(&working.rows(), &candidates, alive, tie)?;

        if self.verbose {
            println!(
                "{}    {}    {}    {}",
                format!("  [{}]", self.name()).bold().red(),
                format!("[RECORDS {:>PRINT_WIDTH$}]", dataset.len()).bold().green(),
                format!("[DEPTH {:>PRINT_WIDTH$}]", root.depth()).bold().yellow(),
                format!("[LEAVES {:>PRINT_WIDTH$}]", root.n_leaves()).bold().yellow(),
            );
        }

        Ok(Id3Classifier::new(root, self.target.clone(), thresholds))
    }


    /// Grow the subtree over `records`.
    /// `alive` marks the entries of `candidates` not tested yet
    /// on the path from the root.
    fn grow<B>(
        &self,
        records:    &[&Record],
        candidates: &[&str],
        alive:      FixedBitSet,
        tie:        &mut B,
    ) -> Result<Node>
        where B: TieBreak + ?Sized
    {
        // All records share one target value.
        let labels = metrics::frequencies(records, &self.target)?;
        if let [(label, _)] = labels.as_slice() {
            return Ok(Node::leaf((*label).clone()));
        }

        // No attribute is left.
        if alive.count_ones(..) == 0 {
            let label = majority(records, &self.target, tie)?;
            return Ok(Node::leaf(label.clone()));
        }

        let remaining = alive.ones()
            .map(|i| candidates[i])
            .collect::<Vec<_>>();
        let best = self.split_by.best_attribute(
            records, &remaining[..], &self.target, tie
        )?;
        let ix = alive.ones()
            .find(|&i| candidates[i] == best)
            .ok_or(Id3Error::NoCandidate)?;

        let mut alive = alive;
        alive.set(ix, false);

        // Each observed value gets a branch; the subsets are never empty.
        let mut children = Vec::new();
        for (value, subset) in metrics::partition(records, best)? {
            let node = self.grow(&subset[..], candidates, alive.clone(), tie)?;
            children.push(Branch { value: value.clone(), node });
        }

        Ok(Node::decision(best, children))
    }
}


impl fmt::Display for Id3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------\n# {}\n", self.name())?;
        for (key, value) in self.info() {
            writeln!(f, "- {key}: {value}")?;
        }
        write!(f, "----------")
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::id3::Id3Builder;
    use crate::tie_break::FirstTie;
    use crate::sample::Value;

    fn sample() -> Dataset {
        let records = [
            ("Sunny", "High", "No"),
            ("Sunny", "Normal", "Yes"),
            ("Overcast", "High", "Yes"),
            ("Rain", "High", "No"),
            ("Rain", "Normal", "Yes"),
            ("Overcast", "Normal", "Yes"),
        ].into_iter()
            .map(|(o, h, y)| {
                Record::new()
                    .with("Outlook", o)
                    .with("Humidity", h)
                    .with("Play", y)
            })
            .collect();
        Dataset::from_records(records).unwrap()
    }

    #[test]
    fn test_pure_sample_is_a_leaf() {
        let records = vec![
            Record::new().with("a", "x").with("y", "Yes"),
            Record::new().with("a", "z").with("y", "Yes"),
        ];
        let data = Dataset::from_records(records).unwrap();
        let f = Id3Builder::new(&data).target("y").build().unwrap()
            .fit(&data)
            .unwrap();
        assert_eq!(f.root(), &Node::leaf(Value::from("Yes")));
    }

    #[test]
    fn test_majority_leaf_when_attributes_run_out() {
        let records = vec![
            Record::new().with("a", "x").with("y", "Yes"),
            Record::new().with("a", "x").with("y", "No"),
            Record::new().with("a", "x").with("y", "No"),
        ];
        let data = Dataset::from_records(records).unwrap();
        let f = Id3Builder::new(&data).target("y").build().unwrap()
            .fit(&data)
            .unwrap();
        // `a` has one value, so the single child is a majority leaf.
        let child = f.root().child(&Value::from("x")).unwrap();
        assert_eq!(child, &Node::leaf(Value::from("No")));
    }

    #[test]
    fn test_fits_training_data() {
        let data = sample();
        let id3 = Id3Builder::new(&data).target("Play").build().unwrap();
        let f = id3.fit_with(&data, &mut FirstTie).unwrap();

        let err = f.validation_error(&data, "Play").unwrap();
        assert_eq!(err, 0f64, "expected zero training error, got {err}.");
        assert!(f.depth() <= 2);
    }

    #[test]
    fn test_empty_dataset() {
        let data = sample();
        let id3 = Id3Builder::new(&data).target("Play").build().unwrap();
        let empty = data.subset(&[]);
        let res = id3.fit(&empty);
        assert!(matches!(res, Err(Id3Error::EmptySample(_))));
    }

    #[test]
    fn test_info() {
        let data = sample();
        let id3 = Id3Builder::new(&data)
            .target("Play")
            .split_by(SplitBy::GainRatio)
            .build()
            .unwrap();
        assert_eq!(id3.name(), "ID3");
        let text = id3.to_string();
        assert!(text.contains("- Split by: Gain ratio"), "got {text}");
    }
}
