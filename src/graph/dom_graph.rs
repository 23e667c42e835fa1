use super::{connected_components, LabelType, NodeSet, Subgraph};
use crate::chart::SolvedForm;
use anyhow::{anyhow, Context, Result};
use strum_macros::AsRefStr;

/// The kind of a node: labelled nodes carry content, unlabelled ones are holes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// A node with a label
    Labelled,
    /// A hole
    Unlabelled,
}

/// The kind of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr)]
pub enum EdgeType {
    /// An edge of the fragment structure
    #[strum(serialize = "tree")]
    Tree,
    /// A scope constraint between fragments
    #[strum(serialize = "dom")]
    Dominance,
}

/// An edge, represented by the ids of its endpoints and its kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    source: usize,
    target: usize,
    kind: EdgeType,
}

impl Edge {
    /// Returns the id of the source node.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the id of the target node.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns the kind of this edge.
    pub fn kind(&self) -> EdgeType {
        self.kind
    }

    /// Given one endpoint of the edge, returns the other one.
    pub fn other_end(&self, node: usize) -> usize {
        if self.source == node {
            self.target
        } else {
            self.source
        }
    }
}

/// A dominance graph.
///
/// Nodes are either labelled or holes; edges are either tree edges (building fragments) or dominance edges.
/// Each node is identified by a name of type `T` and by a dense id given by the underlying [`NodeSet`].
#[derive(Clone, Debug)]
pub struct DomGraph<T>
where
    T: LabelType,
{
    nodes: NodeSet<T>,
    labels: Vec<Option<String>>,
    edges: Vec<Edge>,
    out_edges: Vec<Vec<usize>>,
    in_edges: Vec<Vec<usize>>,
}

impl<T> Default for DomGraph<T>
where
    T: LabelType,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DomGraph<T>
where
    T: LabelType,
{
    /// Builds an empty dominance graph.
    pub fn new() -> Self {
        DomGraph {
            nodes: NodeSet::new_with_names(&[]),
            labels: vec![],
            edges: vec![],
            out_edges: vec![],
            in_edges: vec![],
        }
    }

    fn new_node(&mut self, name: T, label: Option<String>) -> usize {
        let old_len = self.nodes.len();
        let id = self.nodes.new_node(name);
        if self.nodes.len() > old_len {
            self.labels.push(label);
            self.out_edges.push(Vec::new());
            self.in_edges.push(Vec::new());
        }
        id
    }

    /// Adds a labelled node and returns its id.
    ///
    /// If a node with the same name already exists, the graph is unchanged and the existing id is returned.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::graph::{DomGraph, NodeType};
    /// let mut graph = DomGraph::new();
    /// let x = graph.new_labelled_node("x", "every");
    /// assert_eq!(NodeType::Labelled, graph.node_type(x));
    /// assert_eq!(Some("every"), graph.label(x));
    /// ```
    pub fn new_labelled_node(&mut self, name: T, label: &str) -> usize {
        self.new_node(name, Some(label.to_string()))
    }

    /// Adds a hole and returns its id.
    ///
    /// If a node with the same name already exists, the graph is unchanged and the existing id is returned.
    pub fn new_hole(&mut self, name: T) -> usize {
        self.new_node(name, None)
    }

    /// Adds a new edge given the names of its endpoints.
    ///
    /// If one of the names is undefined, an error is returned.
    /// No check is made for the existence of the edge.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::graph::{DomGraph, EdgeType};
    /// let mut graph = DomGraph::new();
    /// graph.new_labelled_node("x", "f");
    /// graph.new_hole("xh");
    /// graph.new_edge(&"x", &"xh", EdgeType::Tree).unwrap();
    /// assert!(graph.new_edge(&"x", &"y", EdgeType::Dominance).is_err());
    /// assert_eq!(1, graph.n_edges());
    /// ```
    pub fn new_edge(&mut self, from: &T, to: &T, kind: EdgeType) -> Result<()> {
        let context = || {
            format!(
                "cannot add a {} edge from {:?} to {:?}",
                kind.as_ref(),
                from,
                to
            )
        };
        let source = self.nodes.get_node_id(from).with_context(context)?;
        let target = self.nodes.get_node_id(to).with_context(context)?;
        self.new_edge_by_ids(source, target, kind)
    }

    /// Adds a new edge given the ids of its endpoints.
    pub fn new_edge_by_ids(&mut self, from: usize, to: usize, kind: EdgeType) -> Result<()> {
        let n_nodes = self.nodes.len();
        if from >= n_nodes || to >= n_nodes {
            return Err(anyhow!(
                "cannot add an edge from identifiers {:?} to {:?}; the graph has {} node(s)",
                from,
                to,
                n_nodes
            ));
        }
        self.edges.push(Edge {
            source: from,
            target: to,
            kind,
        });
        self.out_edges[from].push(self.edges.len() - 1);
        self.in_edges[to].push(self.edges.len() - 1);
        Ok(())
    }

    /// Returns the node set of the graph.
    pub fn node_set(&self) -> &NodeSet<T> {
        &self.nodes
    }

    /// Returns the name of the node with the given id.
    pub fn name(&self, id: usize) -> &T {
        self.nodes.get_node_by_id(id).name()
    }

    /// Returns the number of nodes.
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges (of both kinds).
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the kind of a node.
    pub fn node_type(&self, id: usize) -> NodeType {
        match self.labels[id] {
            Some(_) => NodeType::Labelled,
            None => NodeType::Unlabelled,
        }
    }

    /// Returns the label of a node, or `None` for holes.
    pub fn label(&self, id: usize) -> Option<&str> {
        self.labels[id].as_deref()
    }

    /// Provides an iterator to the edges.
    pub fn iter_edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Provides an iterator to the edges leaving a node, optionally filtered by kind.
    pub fn out_edges(&self, id: usize, kind: Option<EdgeType>) -> impl Iterator<Item = &Edge> + '_ {
        self.out_edges[id]
            .iter()
            .map(|i| &self.edges[*i])
            .filter(move |e| kind.map(|k| k == e.kind).unwrap_or(true))
    }

    /// Provides an iterator to the edges entering a node, optionally filtered by kind.
    pub fn in_edges(&self, id: usize, kind: Option<EdgeType>) -> impl Iterator<Item = &Edge> + '_ {
        self.in_edges[id]
            .iter()
            .map(|i| &self.edges[*i])
            .filter(move |e| kind.map(|k| k == e.kind).unwrap_or(true))
    }

    /// Provides an iterator to the edges incident to a node, whatever their direction.
    pub fn incident_edges(&self, id: usize) -> impl Iterator<Item = &Edge> + '_ {
        self.out_edges(id, None).chain(self.in_edges(id, None))
    }

    /// Returns the targets of the edges of the given kind leaving a node.
    pub fn children(&self, id: usize, kind: EdgeType) -> impl Iterator<Item = usize> + '_ {
        self.out_edges(id, Some(kind)).map(|e| e.target)
    }

    /// Returns the sources of the edges of the given kind entering a node.
    pub fn parents(&self, id: usize, kind: EdgeType) -> impl Iterator<Item = usize> + '_ {
        self.in_edges(id, Some(kind)).map(|e| e.source)
    }

    /// Returns `true` iff the node has no incoming tree edge.
    pub fn is_root(&self, id: usize) -> bool {
        self.in_edges(id, Some(EdgeType::Tree)).next().is_none()
    }

    /// Returns `true` iff the node has no outgoing tree edge.
    pub fn is_leaf(&self, id: usize) -> bool {
        self.out_edges(id, Some(EdgeType::Tree)).next().is_none()
    }

    /// Returns `true` iff the node is unlabelled.
    pub fn is_hole(&self, id: usize) -> bool {
        self.labels[id].is_none()
    }

    /// Returns the ids of the fragment roots, in ascending order.
    pub fn roots(&self) -> Vec<usize> {
        (0..self.n_nodes()).filter(|n| self.is_root(*n)).collect()
    }

    /// Returns the whole node set as a subgraph.
    pub fn all_nodes(&self) -> Subgraph {
        (0..self.n_nodes()).collect()
    }

    /// Returns the fragment of a node, that is the maximal set of nodes connected to it by tree edges.
    pub fn fragment(&self, id: usize) -> Subgraph {
        let mut fragment = Subgraph::new();
        fragment.insert(id);
        let mut to_process = vec![id];
        while let Some(n) = to_process.pop() {
            self.out_edges(n, Some(EdgeType::Tree))
                .chain(self.in_edges(n, Some(EdgeType::Tree)))
                .for_each(|e| {
                    let other = e.other_end(n);
                    if fragment.insert(other) {
                        to_process.push(other);
                    }
                });
        }
        fragment
    }

    /// Returns the holes of the fragment the node belongs to.
    pub fn fragment_holes(&self, id: usize) -> Vec<usize> {
        self.fragment(id)
            .iter()
            .filter(|n| self.is_hole(*n))
            .collect()
    }

    /// Returns the root of the fragment a node belongs to, following the first tree parent of each node.
    pub fn fragment_root(&self, id: usize) -> usize {
        let mut current = id;
        for _ in 0..self.n_nodes() {
            match self.parents(current, EdgeType::Tree).next() {
                Some(p) => current = p,
                None => break,
            }
        }
        current
    }

    /// Returns the number of edges entering a node whose source belongs to the subgraph.
    pub fn indeg_in(&self, id: usize, subgraph: &Subgraph) -> usize {
        self.in_edges(id, None)
            .filter(|e| subgraph.contains(e.source))
            .count()
    }

    /// Returns `true` iff a directed path (over edges of both kinds) leads from a node to another one.
    ///
    /// Each node is reachable from itself.
    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        let mut visited = vec![false; self.n_nodes()];
        let mut to_process = vec![from];
        visited[from] = true;
        while let Some(n) = to_process.pop() {
            if n == to {
                return true;
            }
            self.out_edges(n, None).for_each(|e| {
                if !visited[e.target] {
                    visited[e.target] = true;
                    to_process.push(e.target);
                }
            });
        }
        false
    }

    /// Returns the weakly connected components of the graph.
    pub fn wccs(&self) -> Vec<Subgraph> {
        connected_components::weakly_connected_components(self, &self.all_nodes())
    }

    /// Returns the weakly connected components of the subgraph induced by a set of nodes.
    pub fn wccs_of(&self, subgraph: &Subgraph) -> Vec<Subgraph> {
        connected_components::weakly_connected_components(self, subgraph)
    }

    /// Builds the compact version of this graph.
    ///
    /// Each fragment is reduced to its root and its holes, and a tree edge is set from the root to each hole.
    /// Dominance edges with a dropped endpoint are moved to the root of the fragment of this endpoint.
    /// Names and labels of the remaining nodes are kept.
    pub fn compactify(&self) -> DomGraph<T> {
        let mut compact = DomGraph::new();
        let kept = (0..self.n_nodes())
            .map(|n| self.is_root(n) || self.is_hole(n))
            .collect::<Vec<bool>>();
        (0..self.n_nodes()).filter(|n| kept[*n]).for_each(|n| {
            compact.new_node(self.name(n).clone(), self.labels[n].clone());
        });
        let new_id = |n: usize| {
            compact_id(&compact, self.name(if kept[n] { n } else { self.fragment_root(n) }))
        };
        let mut new_edges = Vec::new();
        (0..self.n_nodes())
            .filter(|n| kept[*n] && !self.is_root(*n))
            .for_each(|h| {
                new_edges.push((new_id(self.fragment_root(h)), new_id(h), EdgeType::Tree))
            });
        self.edges
            .iter()
            .filter(|e| e.kind == EdgeType::Dominance)
            .for_each(|e| {
                let (s, t) = (new_id(e.source), new_id(e.target));
                if s != t {
                    new_edges.push((s, t, EdgeType::Dominance))
                }
            });
        for (s, t, k) in new_edges {
            compact
                .new_edge_by_ids(s, t, k)
                .expect("edge endpoints are nodes of the compact graph");
        }
        compact
    }

    /// Builds the graph in which the dominance edges are replaced by the ones of a solved form.
    pub fn with_dominance_edges(&self, solved_form: &SolvedForm) -> DomGraph<T> {
        let mut result = DomGraph {
            nodes: self.nodes.clone(),
            labels: self.labels.clone(),
            edges: vec![],
            out_edges: vec![Vec::new(); self.n_nodes()],
            in_edges: vec![Vec::new(); self.n_nodes()],
        };
        self.edges
            .iter()
            .filter(|e| e.kind == EdgeType::Tree)
            .map(|e| (e.source, e.target, EdgeType::Tree))
            .chain(
                solved_form
                    .edges()
                    .iter()
                    .map(|e| (e.source(), e.target(), EdgeType::Dominance)),
            )
            .collect::<Vec<_>>()
            .into_iter()
            .for_each(|(s, t, k)| {
                result
                    .new_edge_by_ids(s, t, k)
                    .expect("solved form edges refer to nodes of the graph")
            });
        result
    }
}

fn compact_id<T: LabelType>(compact: &DomGraph<T>, name: &T) -> usize {
    compact
        .node_set()
        .get_node_id(name)
        .expect("kept nodes are registered in the compact graph")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_new_nodes() {
        let mut graph = DomGraph::new();
        assert_eq!(0, graph.new_labelled_node("x", "f"));
        assert_eq!(1, graph.new_hole("xh"));
        assert_eq!(0, graph.new_hole("x"));
        assert_eq!(2, graph.n_nodes());
        assert_eq!(NodeType::Labelled, graph.node_type(0));
        assert_eq!(NodeType::Unlabelled, graph.node_type(1));
        assert!(graph.is_hole(1));
        assert_eq!(None, graph.label(1));
    }

    #[test]
    fn test_new_edge_unknown_name() {
        let mut graph = DomGraph::new();
        graph.new_labelled_node("x", "f");
        graph.new_edge(&"x", &"y", EdgeType::Tree).unwrap_err();
        graph.new_edge(&"y", &"x", EdgeType::Tree).unwrap_err();
        assert_eq!(0, graph.n_edges());
    }

    #[test]
    fn test_new_edge_by_ids_unknown_id() {
        let mut graph = DomGraph::<&str>::new();
        graph.new_hole("x");
        graph.new_edge_by_ids(0, 1, EdgeType::Dominance).unwrap_err();
        graph.new_edge_by_ids(0, 0, EdgeType::Dominance).unwrap();
    }

    #[test]
    fn test_roots_leaves_fragments() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        let mut root_names = graph
            .roots()
            .into_iter()
            .map(|r| graph.name(r).clone())
            .collect::<Vec<String>>();
        root_names.sort_unstable();
        assert_eq!(vec!["x", "y", "z"], root_names);
        assert!(graph.is_leaf(id("xh")));
        assert!(!graph.is_leaf(id("x")));
        assert_eq!(
            [id("x"), id("xh")].into_iter().collect::<Subgraph>(),
            graph.fragment(id("xh"))
        );
        assert_eq!(vec![id("yh")], graph.fragment_holes(id("y")));
        assert_eq!(id("y"), graph.fragment_root(id("yh")));
    }

    #[test]
    fn test_indeg_in() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        assert_eq!(2, graph.indeg_in(id("z"), &graph.all_nodes()));
        let without_xh = [id("y"), id("yh"), id("z")]
            .into_iter()
            .collect::<Subgraph>();
        assert_eq!(1, graph.indeg_in(id("z"), &without_xh));
        assert_eq!(0, graph.indeg_in(id("x"), &graph.all_nodes()));
    }

    #[test]
    fn test_reachability() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        assert!(graph.is_reachable(id("x"), id("z")));
        assert!(graph.is_reachable(id("z"), id("z")));
        assert!(!graph.is_reachable(id("z"), id("x")));
        assert!(!graph.is_reachable(id("x"), id("y")));
    }

    #[test]
    fn test_compactify() {
        let graph = test_utils::read_graph(
            r#"
            label(x, f).
            label(x1, g).
            hole(xh).
            label(x2, a).
            label(z, b).
            tree(x, x1).
            tree(x1, xh).
            tree(x, x2).
            dom(xh, z).
            dom(x1, z).
            "#,
        );
        let compact = graph.compactify();
        assert_eq!(3, compact.n_nodes());
        let id = |s: &str| compact.node_set().get_node_id(&s.to_string()).unwrap();
        assert!(compact.node_set().get_node_id(&"x1".to_string()).is_err());
        assert_eq!(vec![id("xh")], compact.children(id("x"), EdgeType::Tree).collect::<Vec<_>>());
        let mut dominated = compact
            .iter_edges()
            .filter(|e| e.kind() == EdgeType::Dominance)
            .map(|e| (compact.name(e.source()).clone(), compact.name(e.target()).clone()))
            .collect::<Vec<_>>();
        dominated.sort_unstable();
        assert_eq!(
            vec![
                ("x".to_string(), "z".to_string()),
                ("xh".to_string(), "z".to_string())
            ],
            dominated
        );
        assert_eq!(Some("f"), compact.label(id("x")));
    }

    #[test]
    fn test_with_dominance_edges() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        let solved_form = SolvedForm::new(vec![(id("xh"), id("y")), (id("yh"), id("z"))]);
        let solved_graph = graph.with_dominance_edges(&solved_form);
        assert_eq!(graph.n_nodes(), solved_graph.n_nodes());
        assert_eq!(4, solved_graph.n_edges());
        assert_eq!(
            vec![id("y")],
            solved_graph
                .children(id("xh"), EdgeType::Dominance)
                .collect::<Vec<_>>()
        );
        assert!(solved_graph.is_reachable(id("x"), id("z")));
        assert!(!solved_graph.is_reachable(id("y"), id("x")));
    }
}
