use crate::graph::Subgraph;
use std::collections::BTreeMap;
use std::fmt::Display;

/// One way to resolve a subgraph: a root fragment, and the weakly connected components of the rest of the subgraph, grouped by the fragment node dominating them.
///
/// Splits are immutable once built and shared between charts, so two splits are never considered equal, even if they have the same content.
#[derive(Debug)]
pub struct Split {
    root_fragment: usize,
    wccs: BTreeMap<usize, Vec<Subgraph>>,
}

impl Split {
    /// Builds a split without any component for the fragment rooted at the given node.
    pub fn new(root_fragment: usize) -> Self {
        Split {
            root_fragment,
            wccs: BTreeMap::new(),
        }
    }

    /// Attaches a weakly connected component to a dominator of the root fragment.
    ///
    /// No uniqueness check is made: adding the same node set twice produces two distinct components.
    pub fn add_wcc(&mut self, dominator: usize, wcc: Subgraph) {
        self.wccs.entry(dominator).or_default().push(wcc);
    }

    /// Returns the id of the root of the fragment this split resolves first.
    pub fn root_fragment(&self) -> usize {
        self.root_fragment
    }

    /// Returns the dominators (holes, or the root of a weakly normal fragment) having at least one component attached, in ascending order.
    pub fn all_dominators(&self) -> impl Iterator<Item = usize> + '_ {
        self.wccs.keys().copied()
    }

    /// Returns the components attached to a dominator, or `None` if it has none.
    pub fn wccs(&self, dominator: usize) -> Option<&[Subgraph]> {
        self.wccs.get(&dominator).map(|v| v.as_slice())
    }

    /// Iterates over the couples made of a dominator and one of its components.
    pub fn iter_wccs(&self) -> impl Iterator<Item = (usize, &Subgraph)> + '_ {
        self.wccs
            .iter()
            .flat_map(|(d, v)| v.iter().map(move |w| (*d, w)))
    }

    /// Returns all the components of the split, whatever their dominator.
    ///
    /// These are exactly the subgraphs this split refers to.
    pub fn all_subgraphs(&self) -> impl Iterator<Item = &Subgraph> + '_ {
        self.wccs.values().flat_map(|v| v.iter())
    }
}

impl Display for Split {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} {{", self.root_fragment)?;
        for (i, (d, v)) in self.wccs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}=[", d)?;
            for (j, w) in v.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", w)?;
            }
            write!(f, "]")?;
        }
        write!(f, "}}>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subgraph(nodes: &[usize]) -> Subgraph {
        nodes.iter().copied().collect()
    }

    #[test]
    fn test_empty_split() {
        let split = Split::new(3);
        assert_eq!(3, split.root_fragment());
        assert_eq!(0, split.all_dominators().count());
        assert_eq!(0, split.all_subgraphs().count());
        assert!(split.wccs(4).is_none());
        assert_eq!("<3 {}>", split.to_string());
    }

    #[test]
    fn test_add_wccs() {
        let mut split = Split::new(0);
        split.add_wcc(2, subgraph(&[3, 4]));
        split.add_wcc(1, subgraph(&[5]));
        split.add_wcc(2, subgraph(&[6]));
        assert_eq!(vec![1, 2], split.all_dominators().collect::<Vec<usize>>());
        assert_eq!(
            Some(&[subgraph(&[3, 4]), subgraph(&[6])] as &[Subgraph]),
            split.wccs(2)
        );
        assert_eq!(3, split.all_subgraphs().count());
        assert_eq!(
            vec![(1, &subgraph(&[5])), (2, &subgraph(&[3, 4])), (2, &subgraph(&[6]))],
            split.iter_wccs().collect::<Vec<_>>()
        );
        assert_eq!("<0 {1=[{5}], 2=[{3, 4}, {6}]}>", split.to_string());
    }

    #[test]
    fn test_same_wcc_twice() {
        let mut split = Split::new(0);
        split.add_wcc(1, subgraph(&[2]));
        split.add_wcc(1, subgraph(&[2]));
        assert_eq!(2, split.all_subgraphs().count());
    }
}
