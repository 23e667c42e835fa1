use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::fmt::Debug;
use std::fmt::Display;
use std::hash::Hash;

/// The trait for node names.
///
/// Nodes may be named by any type implementing some traits allowing their use in maps and their display.
/// This trait is just a shortcut used to combine them.
///
/// Simple types like [usize] and [String] implements [LabelType].
pub trait LabelType: Clone + Debug + Display + Eq + Hash {}
impl<T: Clone + Debug + Display + Eq + Hash> LabelType for T {}

/// Handles a single node of a dominance graph.
///
/// Each node has a name and an identifier which is unique in a node set.
/// Identifiers are dense: they are given in declaration order, starting at zero.
///
/// Nodes are built by [`NodeSet`] objects.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<T: LabelType> {
    id: usize,
    name: T,
}

impl<T> Node<T>
where
    T: LabelType,
{
    /// Returns the name of the node.
    ///
    /// Example
    ///
    /// ```
    /// # use domchart::graph::{Node, LabelType};
    /// fn describe_node<T: LabelType>(n: &Node<T>) {
    ///     println!("node with id {} has the name {}", n.id(), n.name());
    /// }
    /// ```
    pub fn name(&self) -> &T {
        &self.name
    }

    /// Returns the id of the node.
    pub fn id(&self) -> usize {
        self.id
    }
}

impl<T> Display for Node<T>
where
    T: LabelType,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Handles the set of nodes of a dominance graph.
#[derive(Clone, Debug, Default)]
pub struct NodeSet<T>
where
    T: LabelType,
{
    nodes: Vec<Node<T>>,
    name_to_id: HashMap<T, usize>,
}

impl<T> NodeSet<T>
where
    T: LabelType,
{
    /// Builds a new node set given the names of the nodes.
    ///
    /// Each node will be assigned an id equal to its index in the provided slice of names.
    /// If a name appears multiple times, the first occurrence is the only one that is considered.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::graph::NodeSet;
    /// let nodes = NodeSet::new_with_names(&["x", "xh", "y"]);
    /// assert_eq!(3, nodes.len());
    /// ```
    pub fn new_with_names(names: &[T]) -> Self {
        let mut node_set = NodeSet {
            nodes: Vec::with_capacity(names.len()),
            name_to_id: HashMap::with_capacity(names.len()),
        };
        names.iter().for_each(|n| {
            node_set.new_node(n.clone());
        });
        node_set
    }

    /// Adds a new node to this set and returns its id.
    ///
    /// If a node with the same name is already defined, no node is added and the id of the existing one is returned.
    pub fn new_node(&mut self, name: T) -> usize {
        *self.name_to_id.entry(name.clone()).or_insert_with(|| {
            self.nodes.push(Node {
                id: self.nodes.len(),
                name,
            });
            self.nodes.len() - 1
        })
    }

    /// Returns the number of nodes in the set.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` iff the set has no node.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` iff a node has this name.
    pub fn contains(&self, name: &T) -> bool {
        self.name_to_id.contains_key(name)
    }

    /// Returns the id associated to a node name.
    ///
    /// If no such name exists, an error is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::graph::NodeSet;
    /// let nodes = NodeSet::new_with_names(&["x", "xh", "y"]);
    /// assert_eq!(1, nodes.get_node_id(&"xh").unwrap());
    /// assert!(nodes.get_node_id(&"z").is_err());
    /// ```
    pub fn get_node_id(&self, name: &T) -> Result<usize> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| anyhow!("no such node: {}", name))
    }

    /// Returns the node associated to a name.
    pub fn get_node(&self, name: &T) -> Result<&Node<T>> {
        self.get_node_id(name).map(|i| &self.nodes[i])
    }

    /// Returns the node with the corresponding id.
    ///
    /// # Panics
    ///
    /// Panics if no node has such id.
    pub fn get_node_by_id(&self, id: usize) -> &Node<T> {
        &self.nodes[id]
    }

    /// Returns an iterator to the nodes, in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.nodes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_names() {
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let nodes = NodeSet::new_with_names(&names);
        assert_eq!(3, nodes.len());
        assert!(!nodes.is_empty());
        for (i, n) in nodes.iter().enumerate() {
            assert_eq!(i, n.id());
            assert_eq!(&names[i], n.name());
        }
    }

    #[test]
    fn test_new_with_empty_names() {
        let nodes = NodeSet::new_with_names(&[] as &[String]);
        assert_eq!(0, nodes.len());
        assert!(nodes.is_empty());
    }

    #[test]
    fn test_repeated_names() {
        let mut nodes = NodeSet::new_with_names(&["a", "b", "a"]);
        assert_eq!(2, nodes.len());
        assert_eq!(1, nodes.new_node("b"));
        assert_eq!(2, nodes.new_node("c"));
        assert_eq!(3, nodes.len());
    }

    #[test]
    fn test_get_node() {
        let nodes = NodeSet::new_with_names(&["a", "b"]);
        assert_eq!(&"b", nodes.get_node(&"b").unwrap().name());
        assert!(nodes.contains(&"a"));
        assert!(!nodes.contains(&"c"));
    }

    #[test]
    #[should_panic(expected = "no such node: c")]
    fn test_get_nonexisting_node() {
        let nodes = NodeSet::new_with_names(&["a", "b"]);
        nodes.get_node_id(&"c").unwrap();
    }
}
