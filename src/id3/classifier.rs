//! Defines the ID3 classifier.
use serde::{Serialize, Deserialize};

use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::fs::File;
use std::io::prelude::*;

use super::node::*;
use crate::sample::{Dataset, Record, Value};
use crate::discretizer::Threshold;
use crate::error::{Id3Error, Result};


/// ID3 tree classifier.
/// This struct wraps the root `Node` together with the thresholds
/// fitted for numeric attributes, so raw records can be classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Id3Classifier {
    root: Node,
    target: String,
    thresholds: Vec<Threshold>,
}


impl Id3Classifier {
    #[inline]
    pub(crate) fn new(root: Node, target: String, thresholds: Vec<Threshold>)
        -> Self
    {
        Self { root, target, thresholds }
    }


    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// Returns the name of the target attribute.
    #[inline]
    pub fn target(&self) -> &str {
        &self.target
    }


    /// Returns the thresholds of the discretized attributes.
    #[inline]
    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds[..]
    }


    /// Depth of the tree.
    #[inline]
    pub fn depth(&self) -> usize {
        self.root.depth()
    }


    /// Number of leaves of the tree.
    #[inline]
    pub fn n_leaves(&self) -> usize {
        self.root.n_leaves()
    }


    /// Binarize the discretized attributes of `record`.
    fn prepare<'r>(&self, record: &'r Record) -> Cow<'r, Record> {
        if self.thresholds.is_empty() {
            return Cow::Borrowed(record);
        }

        let mut record = record.clone();
        for threshold in self.thresholds.iter() {
            let name = threshold.attribute.as_str();
            if let Some(value) = record.get(name) {
                let value = threshold.apply(value);
                record.set(name, value);
            }
        }
        Cow::Owned(record)
    }


    /// Predict the target value of `record`.
    ///
    /// Returns `Id3Error::UnseenBranchValue` if the record reaches
    /// a decision node through a value not seen during training,
    /// and `Id3Error::UnknownAttribute` if it lacks a tested attribute.
    pub fn classify(&self, record: &Record) -> Result<&Value> {
        let record = self.prepare(record);
        self.root.classify(&record)
    }


    /// Predict every record of `dataset`.
    /// Records that cannot be classified yield `None`.
    pub fn predict_all(&self, dataset: &Dataset) -> Vec<Option<Value>> {
        dataset.records()
            .iter()
            .map(|record| self.classify(record).ok().cloned())
            .collect()
    }


    /// Returns the fraction of records of `dataset`
    /// whose prediction differs from their value of `target`.
    /// A record reaching an unseen branch counts as an error.
    pub fn validation_error(&self, dataset: &Dataset, target: &str)
        -> Result<f64>
    {
        if dataset.is_empty() {
            return Err(Id3Error::EmptySample("validation error"));
        }

        let mut n_errors = 0_usize;
        for record in dataset.records() {
            let expected = record.value(target)?;
            match self.classify(record) {
                Ok(label) => { n_errors += (label != expected) as usize; },
                Err(Id3Error::UnseenBranchValue { .. }) => { n_errors += 1; },
                Err(e) => { return Err(e); },
            }
        }

        Ok(n_errors as f64 / dataset.len() as f64)
    }


    /// Write the current tree to a dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph Id3Tree {\n")?;

        let info = self.root.to_dot_info(0).0;
        for row in info {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;
        Ok(())
    }


    /// Serialize `self` into a JSON string.
    #[inline]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }


    /// Deserialize a classifier from a JSON string.
    #[inline]
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}


impl From<Node> for Id3Classifier {
    #[inline]
    fn from(root: Node) -> Self {
        Self { root, target: String::new(), thresholds: Vec::new() }
    }
}


impl fmt::Display for Id3Classifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for threshold in self.thresholds.iter() {
            writeln!(f, "# {threshold}")?;
        }
        write!(f, "{}", self.root)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Id3Classifier {
        let root = Node::decision(
            "age",
            vec![
                Branch { value: 0.into(), node: Node::leaf("NO".into()) },
                Branch { value: 1.into(), node: Node::leaf("YES".into()) },
            ],
        );
        let threshold = Threshold {
            attribute: "age".to_string(),
            value: 30.5,
            gain: 0.8,
        };
        Id3Classifier::new(root, "Class".to_string(), vec![threshold])
    }

    #[test]
    fn test_raw_numeric_values_are_binarized() {
        let f = classifier();
        let young = Record::new().with("age", 22.0);
        let old = Record::new().with("age", 41.0);
        assert_eq!(f.classify(&young).unwrap(), &Value::from("NO"));
        assert_eq!(f.classify(&old).unwrap(), &Value::from("YES"));
    }

    #[test]
    fn test_validation_error_counts_unseen_values() {
        let f = classifier();
        let records = vec![
            Record::new().with("age", 22.0).with("Class", "NO"),
            Record::new().with("age", 41.0).with("Class", "NO"),
            Record::new().with("age", Value::missing()).with("Class", "NO"),
            Record::new().with("age", 50.0).with("Class", "YES"),
        ];
        let data = Dataset::from_records(records).unwrap();

        let err = f.validation_error(&data, "Class").unwrap();
        assert_eq!(err, 0.5, "expected 0.5, got {err}.");

        let predictions = f.predict_all(&data);
        assert_eq!(predictions[2], None);
        assert_eq!(predictions[3], Some(Value::from("YES")));
    }

    #[test]
    fn test_validation_error_on_empty_sample() {
        let f = classifier();
        let res = f.validation_error(&Dataset::default(), "Class");
        assert!(matches!(res, Err(Id3Error::EmptySample(_))));
    }

    #[test]
    fn test_json_round_trip() {
        let f = classifier();
        let json = f.to_json().unwrap();
        let g = Id3Classifier::from_json(&json).unwrap();
        assert_eq!(f, g);
    }

    #[test]
    fn test_display_lists_thresholds() {
        let text = classifier().to_string();
        assert!(text.starts_with("# age > 30.5000"), "got {text}");
        assert!(text.contains("|--1 => YES"), "got {text}");
    }
}
