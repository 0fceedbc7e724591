//! A node struct used in the ID3 algorithm.
use serde::{Serialize, Deserialize};

use std::fmt;

use crate::sample::{Record, Value};
use crate::error::{Id3Error, Result};


/// An outgoing edge of a decision node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    /// The value of the tested attribute that leads to `node`.
    pub value: Value,
    /// The subtree.
    pub node: Node,
}


/// A node of an ID3 tree.
/// Children of a decision node are sorted by their value,
/// one per value observed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Tests `attribute` and follows the branch holding its value.
    Decision {
        /// The tested attribute.
        attribute: String,
        /// Branches sorted by value.
        children: Vec<Branch>,
    },
    /// Predicts `label`.
    Leaf {
        /// The predicted target value.
        label: Value,
    },
}


impl Node {
    /// Construct a leaf.
    #[inline]
    pub fn leaf(label: Value) -> Self {
        Self::Leaf { label }
    }


    /// Construct a decision node. `children` is sorted by value.
    pub fn decision<S>(attribute: S, mut children: Vec<Branch>) -> Self
        where S: Into<String>
    {
        children.sort_by(|a, b| a.value.cmp(&b.value));
        Self::Decision { attribute: attribute.into(), children }
    }


    /// Returns `true` if `self` is a leaf.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }


    /// Returns the child reached through `value`, if any.
    pub fn child(&self, value: &Value) -> Option<&Node> {
        match self {
            Self::Leaf { .. } => None,
            Self::Decision { children, .. } => {
                children.binary_search_by(|branch| branch.value.cmp(value))
                    .ok()
                    .map(|k| &children[k].node)
            },
        }
    }


    /// Walk from `self` down to a leaf and return its label.
    pub fn classify(&self, record: &Record) -> Result<&Value> {
        let mut node = self;
        loop {
            match node {
                Self::Leaf { label } => { return Ok(label); },
                Self::Decision { attribute, .. } => {
                    let value = record.value(attribute)?;
                    node = node.child(value)
                        .ok_or_else(|| Id3Error::UnseenBranchValue {
                            attribute: attribute.clone(),
                            value: value.to_string(),
                        })?;
                },
            }
        }
    }


    /// Number of decision nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            Self::Leaf { .. } => 0,
            Self::Decision { children, .. } => {
                1 + children.iter()
                    .map(|branch| branch.node.depth())
                    .max()
                    .unwrap_or(0)
            },
        }
    }


    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        match self {
            Self::Leaf { .. } => 1,
            Self::Decision { children, .. } => {
                children.iter()
                    .map(|branch| branch.node.n_leaves())
                    .sum()
            },
        }
    }


    pub(crate) fn to_dot_info(&self, id: usize) -> (Vec<String>, usize) {
        match self {
            Self::Decision { attribute, children } => {
                let mut info = vec![format!(
                    "\tnode_{id} [ label = \"{} ?\" ];\n",
                    escape(attribute),
                )];

                let mut next_id = id + 1;
                for Branch { value, node } in children {
                    let child_id = next_id;
                    let (mut child, return_id) = node.to_dot_info(child_id);
                    info.append(&mut child);

                    let edge = format!(
                        "\tnode_{id} -- node_{child_id} [ label = \"{}\" ];\n",
                        escape(&value.to_string()),
                    );
                    info.push(edge);
                    next_id = return_id;
                }

                (info, next_id)
            },
            Self::Leaf { label } => {
                let info = format!(
                    "\tnode_{id} [ label = \"{}\", shape = box ];\n",
                    escape(&label.to_string()),
                );

                (vec![info], id + 1)
            },
        }
    }


    fn write_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str)
        -> fmt::Result
    {
        match self {
            Self::Leaf { label } => writeln!(f, "{indent}{label}"),
            Self::Decision { attribute, children } => {
                writeln!(f, "{indent}{attribute}")?;
                for Branch { value, node } in children {
                    match node {
                        Self::Leaf { label } => {
                            writeln!(f, "{indent}  |--{value} => {label}")?;
                        },
                        Self::Decision { .. } => {
                            writeln!(f, "{indent}  |--{value}")?;
                            node.write_tree(f, &format!("{indent}  |    "))?;
                        },
                    }
                }
                Ok(())
            },
        }
    }
}


fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}


impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_tree(f, "")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> Node {
        // Humedad -> { Alta: No, Media: Horario -> { Matutino: Yes, Nocturno: No } }
        let inner = Node::decision(
            "Horario",
            vec![
                Branch { value: "Nocturno".into(), node: Node::leaf("No".into()) },
                Branch { value: "Matutino".into(), node: Node::leaf("Yes".into()) },
            ],
        );
        Node::decision(
            "Humedad",
            vec![
                Branch { value: "Media".into(), node: inner },
                Branch { value: "Alta".into(), node: Node::leaf("No".into()) },
            ],
        )
    }

    #[test]
    fn test_children_are_sorted() {
        let Node::Decision { children, .. } = tree() else {
            panic!("expected a decision node");
        };
        let values = children.iter()
            .map(|b| b.value.to_string())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["Alta", "Media"]);
    }

    #[test]
    fn test_classify() {
        let tree = tree();
        let record = Record::new()
            .with("Humedad", "Media")
            .with("Horario", "Matutino");
        assert_eq!(tree.classify(&record).unwrap(), &Value::from("Yes"));

        let record = Record::new()
            .with("Humedad", "Baja")
            .with("Horario", "Matutino");
        let res = tree.classify(&record);
        assert!(
            matches!(res, Err(Id3Error::UnseenBranchValue { ref attribute, .. }) if attribute == "Humedad")
        );

        let record = Record::new().with("Humedad", "Media");
        let res = tree.classify(&record);
        assert!(matches!(res, Err(Id3Error::UnknownAttribute(_))));
    }

    #[test]
    fn test_shape() {
        let tree = tree();
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_leaves(), 3);
        assert!(!tree.is_leaf());
        assert_eq!(Node::leaf("x".into()).depth(), 0);
    }

    #[test]
    fn test_display() {
        let text = tree().to_string();
        let exp = "\
            Humedad\n  \
            |--Alta => No\n  \
            |--Media\n  \
            |    Horario\n  \
            |      |--Matutino => Yes\n  \
            |      |--Nocturno => No\n";
        assert_eq!(text, exp, "expected\n{exp}\ngot\n{text}");
    }

    #[test]
    fn test_dot_info() {
        let (info, next_id) = tree().to_dot_info(0);
        assert_eq!(next_id, 5);
        assert!(info.iter().any(|row| row.contains("node_0 -- node_2")));
        assert_eq!(info.iter().filter(|row| row.contains("shape = box")).count(), 3);
    }
}
