use std::collections::BTreeSet;
use std::fmt::Display;

/// A set of node ids, used as the key of chart entries.
///
/// Equality, hashing and ordering only depend on the content of the set,
/// not on the order in which the nodes were inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Subgraph(BTreeSet<usize>);

impl Subgraph {
    /// Builds an empty subgraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node; returns `false` if it was already present.
    pub fn insert(&mut self, node: usize) -> bool {
        self.0.insert(node)
    }

    /// Returns `true` iff the node belongs to this subgraph.
    pub fn contains(&self, node: usize) -> bool {
        self.0.contains(&node)
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` iff the subgraph has no node.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the node ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Returns `true` iff the two subgraphs share no node.
    pub fn is_disjoint(&self, other: &Subgraph) -> bool {
        self.0.is_disjoint(&other.0)
    }
}

impl FromIterator<usize> for Subgraph {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Subgraph(iter.into_iter().collect())
    }
}

impl Extend<usize> for Subgraph {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl Display for Subgraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, n) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", n)?;
        }
        write!(f, "}}")
    }
}
