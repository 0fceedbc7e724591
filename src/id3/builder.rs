use crate::{
    discretizer::Discretizer,
    sample::Dataset,
    split_by::SplitBy,
    tie_break::TieBreakPolicy,
    error::{Id3Error, Result},
};
use super::tree::Id3;


/// A struct that builds [`Id3`].
/// `Id3Builder` keeps the parameters for constructing `Id3`
/// and checks them against the schema of `dataset`.
///
/// # Example
///
/// ```no_run
/// use id3tree::prelude::*;
///
/// let file = "/path/to/data/file.arff";
/// let dataset = DatasetReader::new()
///     .file(file)
///     .read()
///     .unwrap();
/// let id3 = Id3Builder::new(&dataset)
///     .target("Class/ASD")
///     .numeric_attributes(["age", "result"])
///     .seed(1234)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct Id3Builder<'a> {
    dataset:       &'a Dataset,
    target:        Option<String>,
    attributes:    Option<Vec<String>>,
    numeric:       Vec<String>,
    skip_constant: bool,
    split_by:      SplitBy,
    tie_break:     TieBreakPolicy,
    verbose:       bool,
}


impl<'a> Id3Builder<'a> {
    /// Construct a new instance of [`Id3Builder`].
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            target: None,
            attributes: None,
            numeric: Vec::new(),
            skip_constant: false,
            split_by: SplitBy::default(),
            tie_break: TieBreakPolicy::default(),
            verbose: false,
        }
    }


    /// Set the target attribute. Required.
    #[inline]
    pub fn target<S: Into<String>>(mut self, name: S) -> Self {
        self.target = Some(name.into());
        self
    }


    /// Set the attributes the tree may test.
    /// By default, every attribute except the target is a candidate.
    #[inline]
    pub fn attributes<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        self.attributes = Some(names.into_iter().map(Into::into).collect());
        self
    }


    /// Set the node splitting rule.
    /// Default value is `SplitBy::InformationGain`.
    /// Ignored when numeric attributes are given.
    #[inline]
    pub fn split_by(mut self, split_by: SplitBy) -> Self {
        self.split_by = split_by;
        self
    }


    /// Binarize the given numeric attributes before growing the tree.
    /// Trees over binarized attributes are always grown
    /// with `SplitBy::InformationGain`.
    #[inline]
    pub fn numeric_attributes<I, S>(mut self, names: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>,
    {
        self.numeric = names.into_iter().map(Into::into).collect();
        self
    }


    /// Leave a numeric attribute unchanged if it has
    /// no threshold candidate. See [`Discretizer::skip_constant`].
    /// Default value is `false`.
    #[inline]
    pub fn skip_constant(mut self, flag: bool) -> Self {
        self.skip_constant = flag;
        self
    }


    /// Set the tie breaking policy.
    /// Default value is `TieBreakPolicy::Seeded(1234)`.
    #[inline]
    pub fn tie_break(mut self, policy: TieBreakPolicy) -> Self {
        self.tie_break = policy;
        self
    }


    /// Break ties at random with the given seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.tie_break = TieBreakPolicy::Seeded(seed);
        self
    }


    /// If `true`, fitting prints a summary of the tree.
    /// Default value is `false`.
    #[inline]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }


    /// Build an `Id3`.
    /// This method consumes `self`.
    pub fn build(self) -> Result<Id3> {
        let target = self.target.ok_or(Id3Error::MissingTarget)?;
        self.dataset.attribute(&target)?;

        let attributes = match self.attributes {
            Some(names) => names,
            None => {
                self.dataset.attribute_names()
                    .into_iter()
                    .filter(|name| *name != target)
                    .map(String::from)
                    .collect()
            },
        };
        for name in attributes.iter().chain(self.numeric.iter()) {
            self.dataset.attribute(name)?;
        }

        let (discretizer, split_by) = if self.numeric.is_empty() {
            (None, self.split_by)
        } else {
            let discretizer = Discretizer::new(target.as_str())
                .attributes(self.numeric)
                .skip_constant(self.skip_constant)
                .verbose(self.verbose);
            (Some(discretizer), SplitBy::InformationGain)
        };

        let id3 = Id3::new(
            target,
            attributes,
            discretizer,
            split_by,
            self.tie_break,
            self.verbose,
        );
        Ok(id3)
    }
}
