use super::{DomGraph, EdgeType, LabelType};
use strum_macros::{AsRefStr, EnumIter};

/// The structural properties a dominance graph may have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumIter)]
pub enum GraphProperty {
    /// At most one tree parent per node, one root per fragment
    #[strum(serialize = "simple")]
    Simple,
    /// Every hole is a leaf
    #[strum(serialize = "leaf-labelled")]
    LeafLabelled,
    /// Every fragment contains a labelled node
    #[strum(serialize = "no-empty-fragments")]
    NoEmptyFragments,
    /// Simple, and dominance edges point to roots
    #[strum(serialize = "weakly-normal")]
    WeaklyNormal,
    /// Weakly normal, leaf-labelled, without empty fragments, and dominance edges leave holes
    #[strum(serialize = "normal")]
    Normal,
    /// Tree edges go from roots to holes
    #[strum(serialize = "compact")]
    Compact,
    /// Simple and leaf-labelled
    #[strum(serialize = "compactifiable")]
    Compactifiable,
}

/// The result of the classification of a dominance graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    simple: bool,
    leaf_labelled: bool,
    no_empty_fragments: bool,
    weakly_normal: bool,
    normal: bool,
    compact: bool,
}

impl Classification {
    /// Returns `true` iff the classified graph has the property.
    pub fn has(&self, property: GraphProperty) -> bool {
        match property {
            GraphProperty::Simple => self.simple,
            GraphProperty::LeafLabelled => self.leaf_labelled,
            GraphProperty::NoEmptyFragments => self.no_empty_fragments,
            GraphProperty::WeaklyNormal => self.weakly_normal,
            GraphProperty::Normal => self.normal,
            GraphProperty::Compact => self.compact,
            GraphProperty::Compactifiable => self.simple && self.leaf_labelled,
        }
    }
}

/// Computes all the properties of a graph at once.
pub fn classify<T>(graph: &DomGraph<T>) -> Classification
where
    T: LabelType,
{
    let simple = is_simple(graph);
    let leaf_labelled = is_leaf_labelled(graph);
    let no_empty_fragments = has_no_empty_fragments(graph);
    let dom_edges_to_roots = dominance_edges_point_to_roots(graph);
    let weakly_normal = simple && dom_edges_to_roots;
    Classification {
        simple,
        leaf_labelled,
        no_empty_fragments,
        weakly_normal,
        normal: weakly_normal
            && leaf_labelled
            && no_empty_fragments
            && dominance_edges_leave_holes(graph),
        compact: is_compact(graph),
    }
}

/// Checks that every node has at most one tree parent and that every fragment has exactly one root.
pub fn is_simple<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    if (0..graph.n_nodes()).any(|n| graph.parents(n, EdgeType::Tree).count() > 1) {
        return false;
    }
    let mut seen = vec![false; graph.n_nodes()];
    for n in 0..graph.n_nodes() {
        if seen[n] {
            continue;
        }
        let fragment = graph.fragment(n);
        fragment.iter().for_each(|m| seen[m] = true);
        if fragment.iter().filter(|m| graph.is_root(*m)).count() != 1 {
            return false;
        }
    }
    true
}

/// Checks that every hole is a leaf.
pub fn is_leaf_labelled<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    (0..graph.n_nodes()).all(|n| !graph.is_hole(n) || graph.is_leaf(n))
}

/// Checks that every fragment contains at least one labelled node.
pub fn has_no_empty_fragments<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    graph
        .roots()
        .into_iter()
        .all(|r| graph.fragment(r).iter().any(|n| !graph.is_hole(n)))
}

/// Checks that the graph is simple and that every dominance edge points to a root.
pub fn is_weakly_normal<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    is_simple(graph) && dominance_edges_point_to_roots(graph)
}

/// Checks that the graph is weakly normal, leaf-labelled, without empty fragment, and that dominance edges leave holes.
pub fn is_normal<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    classify(graph).normal
}

/// Checks that every tree edge goes from a root to a hole.
pub fn is_compact<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    graph
        .iter_edges()
        .filter(|e| e.kind() == EdgeType::Tree)
        .all(|e| graph.is_root(e.source()) && graph.is_hole(e.target()))
}

/// Checks that the graph can be turned into a compact one without losing information.
pub fn is_compactifiable<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    is_simple(graph) && is_leaf_labelled(graph)
}

fn dominance_edges_point_to_roots<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    graph
        .iter_edges()
        .filter(|e| e.kind() == EdgeType::Dominance)
        .all(|e| graph.is_root(e.target()))
}

fn dominance_edges_leave_holes<T>(graph: &DomGraph<T>) -> bool
where
    T: LabelType,
{
    graph
        .iter_edges()
        .filter(|e| e.kind() == EdgeType::Dominance)
        .all(|e| graph.is_hole(e.source()))
}
