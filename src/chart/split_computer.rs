use super::Split;
use crate::graph::{DomGraph, LabelType, Subgraph};
use std::collections::BTreeMap;

/// Computes the split induced by a candidate free root on a subgraph.
///
/// The computation is a depth-first search starting at the dominance edges leaving the fragment of the root.
/// Each node outside the fragment is tagged by the couple (dominator, entry node) through which it was first reached;
/// the nodes sharing a tag form a weakly connected component of the split.
/// The root is not free if an outside component can be reached from two distinct dominators.
///
/// Scratch buffers are kept between calls.
pub struct SplitComputer<'a, T>
where
    T: LabelType,
{
    graph: &'a DomGraph<T>,
    in_fragment: Vec<bool>,
    tags: Vec<Option<(usize, usize)>>,
    dfs_stack: Vec<usize>,
}

impl<'a, T> SplitComputer<'a, T>
where
    T: LabelType,
{
    /// Builds a split computer for the given graph.
    pub fn new(graph: &'a DomGraph<T>) -> Self {
        SplitComputer {
            graph,
            in_fragment: vec![false; graph.n_nodes()],
            tags: vec![None; graph.n_nodes()],
            dfs_stack: Vec::new(),
        }
    }

    /// Computes the split of the subgraph whose root fragment is the one of `root`.
    ///
    /// Returns `None` if the fragment is not free in this subgraph.
    /// This is an expected outcome for many candidate roots.
    pub fn compute_split(&mut self, root: usize, subgraph: &Subgraph) -> Option<Split> {
        self.in_fragment.iter_mut().for_each(|b| *b = false);
        self.tags.iter_mut().for_each(|t| *t = None);
        self.dfs_stack.clear();
        let fragment = self
            .graph
            .fragment(root)
            .iter()
            .filter(|n| subgraph.contains(*n))
            .collect::<Vec<usize>>();
        fragment.iter().for_each(|n| self.in_fragment[*n] = true);
        for dominator in fragment.iter().copied() {
            let graph = self.graph;
            for entry in graph.out_edges(dominator, None).map(|e| e.target()) {
                if !subgraph.contains(entry) || self.in_fragment[entry] {
                    continue;
                }
                match self.tags[entry] {
                    Some((d, _)) if d == dominator => continue,
                    Some(_) => return None,
                    None => {}
                }
                if !self.explore_from(dominator, entry, subgraph) {
                    return None;
                }
            }
        }
        let mut wccs: BTreeMap<(usize, usize), Subgraph> = BTreeMap::new();
        for n in subgraph.iter() {
            if self.in_fragment[n] {
                continue;
            }
            match self.tags[n] {
                Some(tag) => {
                    wccs.entry(tag).or_default().insert(n);
                }
                None => return None,
            }
        }
        let mut split = Split::new(root);
        wccs.into_iter()
            .for_each(|((dominator, _), wcc)| split.add_wcc(dominator, wcc));
        Some(split)
    }

    fn explore_from(&mut self, dominator: usize, entry: usize, subgraph: &Subgraph) -> bool {
        let tag = (dominator, entry);
        self.tags[entry] = Some(tag);
        self.dfs_stack.push(entry);
        let graph = self.graph;
        while let Some(n) = self.dfs_stack.pop() {
            debug_assert_eq!(Some(tag), self.tags[n]);
            for other in graph.incident_edges(n).map(|e| e.other_end(n)) {
                if !subgraph.contains(other) {
                    continue;
                }
                if self.in_fragment[other] {
                    if other != dominator {
                        return false;
                    }
                    continue;
                }
                match self.tags[other] {
                    None => {
                        self.tags[other] = Some(tag);
                        self.dfs_stack.push(other);
                    }
                    Some((d, _)) if d != dominator => return false,
                    Some(_) => {}
                }
            }
        }
        true
    }
}
