use serde::{Serialize, Deserialize};

use std::ops::Index;

use super::value::Value;
use crate::error::{Id3Error, Result};


/// One labeled example.
/// An insertion-ordered mapping from attribute name to [`Value`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<(String, Value)>,
}


impl Record {
    /// Construct an empty record.
    #[inline]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }


    /// Append `(name, value)` and return `self`.
    /// If `name` already exists, its value is replaced.
    #[inline]
    pub fn with<S, V>(mut self, name: S, value: V) -> Self
        where S: Into<String>,
              V: Into<Value>,
    {
        self.set(name, value);
        self
    }


    /// Set the value of `name`.
    /// Returns the old value if `name` already existed.
    pub fn set<S, V>(&mut self, name: S, value: V) -> Option<Value>
        where S: Into<String>,
              V: Into<Value>,
    {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => Some(std::mem::replace(v, value)),
            None => {
                self.fields.push((name, value));
                None
            },
        }
    }


    /// Returns the value of `name`, if any.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }


    /// Returns the value of `name`,
    /// or `Id3Error::UnknownAttribute` if the record lacks it.
    #[inline]
    pub fn value(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| Id3Error::UnknownAttribute(name.to_string()))
    }


    /// Number of attributes.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }


    /// Returns `true` if the record has no attribute.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }


    /// Iterate over `(name, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }


    /// Returns the attribute names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }
}


impl<S, V> FromIterator<(S, V)> for Record
    where S: Into<String>,
          V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (S, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |record, (name, value)| record.with(name, value))
    }
}


impl Index<&str> for Record {
    type Output = Value;
    fn index(&self, name: &str) -> &Self::Output {
        self.get(name)
            .unwrap_or_else(|| panic!("The attribute `{name}` does not exist"))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_replaces_in_place() {
        let mut record = Record::new()
            .with("age", 30.0)
            .with("class", "YES");
        let old = record.set("age", 1);
        assert_eq!(old, Some(Value::from(30.0)));
        assert_eq!(record["age"], Value::from(1.0));

        let names = record.names().collect::<Vec<_>>();
        assert_eq!(names, vec!["age", "class"]);
    }

    #[test]
    fn test_unknown_attribute() {
        let record = Record::from_iter([("a", "x")]);
        assert!(matches!(
            record.value("b"),
            Err(Id3Error::UnknownAttribute(name)) if name == "b"
        ));
    }
}
