use std::fmt::Display;

/// A dominance edge of a solved form, given by the ids of its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomEdge {
    source: usize,
    target: usize,
}

impl DomEdge {
    /// Builds a new dominance edge.
    pub fn new(source: usize, target: usize) -> Self {
        DomEdge { source, target }
    }

    /// Returns the id of the dominating node.
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the id of the dominated node.
    pub fn target(&self) -> usize {
        self.target
    }
}

impl Display for DomEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.source, self.target)
    }
}

/// A solved form, that is a set of dominance edges turning the graph into a forest.
///
/// Edges are kept sorted, so two solved forms are equal iff they have the same edges.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SolvedForm {
    edges: Vec<DomEdge>,
}

impl SolvedForm {
    /// Builds a solved form from couples of node ids.
    pub fn new(edges: Vec<(usize, usize)>) -> Self {
        edges.into_iter().map(|(s, t)| DomEdge::new(s, t)).collect()
    }

    /// Returns the edges of the solved form, sorted by source and target.
    pub fn edges(&self) -> &[DomEdge] {
        &self.edges
    }

    /// Returns the number of edges.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Returns `true` iff the solved form has no edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

impl FromIterator<DomEdge> for SolvedForm {
    fn from_iter<I: IntoIterator<Item = DomEdge>>(iter: I) -> Self {
        let mut edges = iter.into_iter().collect::<Vec<DomEdge>>();
        edges.sort_unstable();
        SolvedForm { edges }
    }
}

impl Display for SolvedForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, e) in self.edges.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", e)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_are_sorted() {
        let solved_form = SolvedForm::new(vec![(3, 4), (1, 2), (1, 0)]);
        assert_eq!(
            vec![(1, 0), (1, 2), (3, 4)],
            solved_form
                .edges()
                .iter()
                .map(|e| (e.source(), e.target()))
                .collect::<Vec<_>>()
        );
        assert_eq!(SolvedForm::new(vec![(1, 2), (3, 4), (1, 0)]), solved_form);
        assert_eq!("[(1,0),(1,2),(3,4)]", solved_form.to_string());
    }

    #[test]
    fn test_empty() {
        let solved_form = SolvedForm::default();
        assert!(solved_form.is_empty());
        assert_eq!("[]", solved_form.to_string());
    }
}
