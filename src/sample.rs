//! Labeled examples: values, records, datasets and file readers.

// Provides the value type.
pub(crate) mod value;
// Provides the record struct.
pub(crate) mod record;
// Provides the dataset struct.
pub(crate) mod dataset;

// Provides a struct that reads a file.
pub(crate) mod reader;


pub use value::Value;
pub use record::Record;
pub use dataset::{Attribute, AttributeKind, Dataset};
pub use reader::{DatasetReader, read_arff, read_csv};
