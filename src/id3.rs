/// Defines the builder of `Id3`.
pub mod builder;
/// Defines the ID3 learner.
pub mod tree;
/// Defines the classifier produced by `Id3`.
pub mod classifier;

/// Defines the inner representation of `Id3Classifier`.
mod node;


pub use builder::Id3Builder;
pub use tree::Id3;
pub use classifier::Id3Classifier;
pub use node::{Node, Branch};
