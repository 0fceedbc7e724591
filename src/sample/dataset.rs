use polars::prelude::*;
use rand::prelude::*;

use std::fmt;
use std::ops::Index;
use std::collections::HashSet;

use super::{
    record::Record,
    value::Value,
};
use crate::error::{Id3Error, Result};


/// The type of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    /// Categorical attribute.
    Nominal,
    /// Continuous attribute.
    Numeric,
}


impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self {
            Self::Nominal => "nominal",
            Self::Numeric => "numeric",
        };
        write!(f, "{kind}")
    }
}


/// A declared attribute of a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Attribute type.
    pub kind: AttributeKind,
}


impl Attribute {
    /// Construct a new attribute.
    #[inline]
    pub fn new<S: Into<String>>(name: S, kind: AttributeKind) -> Self {
        Self { name: name.into(), kind }
    }
}


/// An ordered sequence of [`Record`]s sharing one schema.
/// Every record holds a value (possibly the missing sentinel)
/// for every declared attribute, and nothing else.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    attributes: Vec<Attribute>,
    records: Vec<Record>,
}


impl Dataset {
    /// Construct an empty dataset with the given schema.
    #[inline]
    pub fn new(attributes: Vec<Attribute>) -> Self {
        Self { attributes, records: Vec::new() }
    }


    /// Construct a dataset from literal records.
    /// The schema is the attribute list of the first record.
    /// An attribute is numeric if every non-missing value is numeric
    /// and at least one value is numeric.
    pub fn from_records(records: Vec<Record>) -> Result<Self> {
        let Some(first) = records.first() else {
            return Ok(Self::default());
        };
        let attributes = first.names()
            .map(|name| {
                let mut n_numeric = 0_usize;
                let mut all_numeric = true;
                for record in records.iter() {
                    match record.get(name) {
                        Some(Value::Numeric(_)) => { n_numeric += 1; },
                        Some(v) if v.is_missing() => {},
                        _ => { all_numeric = false; },
                    }
                }
                let kind = if all_numeric && n_numeric > 0 {
                    AttributeKind::Numeric
                } else {
                    AttributeKind::Nominal
                };
                Attribute::new(name, kind)
            })
            .collect::<Vec<_>>();

        Self::with_schema(attributes, records)
    }


    /// Construct a dataset from a schema and records.
    /// Returns `Id3Error::SchemaMismatch` if a record
    /// does not carry exactly the declared attributes.
    pub fn with_schema(attributes: Vec<Attribute>, records: Vec<Record>)
        -> Result<Self>
    {
        let mut dataset = Self::new(attributes);
        dataset.records.reserve(records.len());
        for record in records {
            dataset.push(record)?;
        }
        Ok(dataset)
    }


    /// Convert a `polars::DataFrame` into `Dataset`.
    /// Numeric columns become numeric attributes,
    /// every other column is cast to strings.
    /// Null entries become the missing sentinel.
    pub fn from_dataframe(data: &DataFrame) -> Result<Self> {
        let n_sample = data.height();
        let mut attributes = Vec::with_capacity(data.width());
        let mut columns = Vec::with_capacity(data.width());

        for series in data.get_columns() {
            let name = series.name().to_string();
            if series.dtype().is_numeric() {
                let series = series.cast(&DataType::Float64)?;
                let column = series.f64()?
                    .into_iter()
                    .map(|x| x.map(Value::Numeric).unwrap_or_else(Value::missing))
                    .collect::<Vec<_>>();
                attributes.push(Attribute::new(name, AttributeKind::Numeric));
                columns.push(column);
            } else {
                let series = series.cast(&DataType::Utf8)?;
                let column = series.utf8()?
                    .into_iter()
                    .map(|s| s.map(Value::from).unwrap_or_else(Value::missing))
                    .collect::<Vec<_>>();
                attributes.push(Attribute::new(name, AttributeKind::Nominal));
                columns.push(column);
            }
        }

        let records = (0..n_sample)
            .map(|i| {
                attributes.iter()
                    .zip(columns.iter())
                    .map(|(attr, column)| (attr.name.clone(), column[i].clone()))
                    .collect::<Record>()
            })
            .collect::<Vec<_>>();

        Ok(Self { attributes, records })
    }


    /// Append a record.
    pub fn push(&mut self, record: Record) -> Result<()> {
        let row = self.records.len();
        if record.len() != self.attributes.len() {
            let reason = format!(
                "expected {} attributes, got {}",
                self.attributes.len(),
                record.len(),
            );
            return Err(Id3Error::SchemaMismatch { row, reason });
        }
        if let Some(attr) = self.attributes.iter()
            .find(|attr| record.get(&attr.name).is_none())
        {
            let reason = format!("attribute `{}` is absent", attr.name);
            return Err(Id3Error::SchemaMismatch { row, reason });
        }
        self.records.push(record);
        Ok(())
    }


    /// Returns the pair `(# of records, # of attributes)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.records.len(), self.attributes.len())
    }


    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }


    /// Returns `true` if there is no record.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }


    /// Returns the schema.
    #[inline]
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes[..]
    }


    /// Returns the attribute names in schema order.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.iter()
            .map(|attr| attr.name.as_str())
            .collect()
    }


    /// Returns the attribute named `name`.
    pub fn attribute(&self, name: &str) -> Result<&Attribute> {
        self.attributes.iter()
            .find(|attr| attr.name == name)
            .ok_or_else(|| Id3Error::UnknownAttribute(name.to_string()))
    }


    /// Returns a slice of the records.
    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records[..]
    }


    /// Returns references to all records.
    /// Impurity measures and the tree builder work on such views.
    #[inline]
    pub fn rows(&self) -> Vec<&Record> {
        self.records.iter().collect()
    }


    /// Returns the values of the attribute `name`.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        self.attribute(name)?;
        self.records.iter()
            .map(|record| record.value(name))
            .collect()
    }


    /// Returns the distinct values of `name` in first-seen order.
    pub fn distinct_values(&self, name: &str) -> Result<Vec<&Value>> {
        let mut seen = HashSet::new();
        let values = self.column(name)?
            .into_iter()
            .filter(|v| seen.insert(*v))
            .collect();
        Ok(values)
    }


    /// Returns a copy of `self` whose column `name` is replaced by `values`.
    /// Used to commit a discretized column into a fresh working copy.
    pub(crate) fn with_column(&self, name: &str, values: Vec<Value>)
        -> Result<Self>
    {
        assert_eq!(values.len(), self.len());
        self.attribute(name)?;
        let mut dataset = self.clone();
        for (record, value) in dataset.records.iter_mut().zip(values) {
            record.set(name, value);
        }
        Ok(dataset)
    }


    /// Shuffle the records with the given seed.
    pub fn shuffle(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.records.shuffle(&mut rng);
    }


    /// Returns the records at `indices` as a new dataset.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let records = indices.iter()
            .map(|&i| self.records[i].clone())
            .collect();
        Self { attributes: self.attributes.clone(), records }
    }


    /// Split `self` into `(train, test)` where `test` holds
    /// the records at positions `start..end`.
    pub fn split(&self, start: usize, end: usize) -> (Self, Self) {
        assert!(start <= end && end <= self.len());
        let test = self.records[start..end].to_vec();
        let train = self.records[..start].iter()
            .chain(self.records[end..].iter())
            .cloned()
            .collect();

        let attributes = self.attributes.clone();
        let train = Self { attributes: attributes.clone(), records: train };
        let test = Self { attributes, records: test };
        (train, test)
    }


    /// Shuffle a copy of `self` and split it into `(test, train)`,
    /// where `test` holds the first `⌊ratio · n⌋` records.
    pub fn holdout(&self, ratio: f64, seed: u64) -> (Self, Self) {
        assert!(
            0f64 < ratio && ratio < 1f64,
            "Holdout ratio should be in `(0, 1)`."
        );
        let mut data = self.clone();
        data.shuffle(seed);
        let limit = (data.len() as f64 * ratio) as usize;
        let (train, test) = data.split(0, limit);
        (test, train)
    }
}


impl Index<usize> for Dataset {
    type Output = Record;
    #[inline]
    fn index(&self, row: usize) -> &Self::Output {
        &self.records[row]
    }
}


impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (n_sample, n_attribute) = self.shape();
        writeln!(f, "Dataset: {n_sample} records, {n_attribute} attributes")?;
        for attr in self.attributes.iter() {
            writeln!(f, "\t* {} ({})", attr.name, attr.kind)?;
        }
        Ok(())
    }
}
