use super::{Chart, Split, SplitComputer};
use crate::graph::{DomGraph, LabelType, Subgraph};
use anyhow::Result;
use std::collections::HashSet;
use std::sync::Arc;

/// A trait for objects proposing the splits of a subgraph.
pub trait SplitSource {
    /// Computes the splits of a subgraph.
    ///
    /// An empty result means the subgraph has no free fragment.
    fn compute_splits(&mut self, subgraph: &Subgraph) -> Vec<Split>;
}

/// A split source returning a split for each free root of the subgraph.
///
/// The candidate roots are the roots of the graph that belong to the subgraph and have no incoming edge from it.
/// Splits are returned in ascending order of their root.
pub struct CompleteSplitSource<'a, T>
where
    T: LabelType,
{
    graph: &'a DomGraph<T>,
    roots: Vec<usize>,
    split_computer: SplitComputer<'a, T>,
}

impl<'a, T> CompleteSplitSource<'a, T>
where
    T: LabelType,
{
    /// Builds a new complete split source for the given graph.
    pub fn new(graph: &'a DomGraph<T>) -> Self {
        CompleteSplitSource {
            graph,
            roots: graph.roots(),
            split_computer: SplitComputer::new(graph),
        }
    }

    fn potential_free_roots<'b>(
        &'b self,
        subgraph: &'b Subgraph,
    ) -> impl Iterator<Item = usize> + 'b {
        self.roots
            .iter()
            .copied()
            .filter(move |r| subgraph.contains(*r) && self.graph.indeg_in(*r, subgraph) == 0)
    }
}

impl<T> SplitSource for CompleteSplitSource<'_, T>
where
    T: LabelType,
{
    fn compute_splits(&mut self, subgraph: &Subgraph) -> Vec<Split> {
        let candidates = self.potential_free_roots(subgraph).collect::<Vec<usize>>();
        candidates
            .into_iter()
            .filter_map(|r| self.split_computer.compute_split(r, subgraph))
            .collect()
    }
}

/// A predicate over splits, used to remove redundant ones.
///
/// Closures taking a subgraph and one of its splits implement this trait.
pub trait SplitFilter {
    /// Returns `true` iff the split must be kept.
    fn accept(&mut self, subgraph: &Subgraph, split: &Split) -> bool;
}

impl<F> SplitFilter for F
where
    F: FnMut(&Subgraph, &Split) -> bool,
{
    fn accept(&mut self, subgraph: &Subgraph, split: &Split) -> bool {
        self(subgraph, split)
    }
}

/// A split source keeping only the splits of another source accepted by a filter.
///
/// When a filter rejects all the splits of a subgraph, the first one is kept.
pub struct FilteringSplitSource<S, F>
where
    S: SplitSource,
    F: SplitFilter,
{
    inner: S,
    filter: F,
}

impl<S, F> FilteringSplitSource<S, F>
where
    S: SplitSource,
    F: SplitFilter,
{
    /// Wraps a split source.
    pub fn new(inner: S, filter: F) -> Self {
        FilteringSplitSource { inner, filter }
    }
}

impl<S, F> SplitSource for FilteringSplitSource<S, F>
where
    S: SplitSource,
    F: SplitFilter,
{
    fn compute_splits(&mut self, subgraph: &Subgraph) -> Vec<Split> {
        let splits = self.inner.compute_splits(subgraph);
        let accepted = splits
            .iter()
            .map(|s| self.filter.accept(subgraph, s))
            .collect::<Vec<bool>>();
        if accepted.iter().any(|a| *a) {
            splits
                .into_iter()
                .zip(accepted)
                .filter_map(|(s, a)| if a { Some(s) } else { None })
                .collect()
        } else {
            splits.into_iter().take(1).collect()
        }
    }
}

/// Removes the splits of an already filled chart that are rejected by a filter.
///
/// Subgraphs are processed top-down, starting from the top-level subgraphs.
/// As for [`FilteringSplitSource`], a subgraph keeps its first split if the filter rejects all of them.
/// The subgraphs that are no longer referenced after a reduction are removed from the chart.
pub fn filter_chart<F>(chart: &mut Chart, mut filter: F) -> Result<()>
where
    F: SplitFilter,
{
    let mut to_process = chart.toplevel_subgraphs().to_vec();
    let mut processed = HashSet::new();
    while let Some(subgraph) = to_process.pop() {
        if !processed.insert(subgraph.clone()) || !chart.contains_split_for(&subgraph) {
            continue;
        }
        let splits = chart.splits_for(&subgraph).to_vec();
        let mut kept = splits
            .iter()
            .filter(|s| filter.accept(&subgraph, s))
            .map(Arc::clone)
            .collect::<Vec<Arc<Split>>>();
        if kept.is_empty() {
            kept.push(Arc::clone(&splits[0]));
        }
        if kept.len() < splits.len() {
            chart.set_splits_for_subgraph(&subgraph, kept.clone())?;
        }
        kept.iter()
            .flat_map(|s| s.all_subgraphs())
            .for_each(|s| to_process.push(s.clone()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSolver;
    use crate::test_utils;
    use num_bigint::BigUint;
    use paste::paste;

    #[test]
    fn test_complete_source() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        let mut source = CompleteSplitSource::new(&graph);
        let splits = source.compute_splits(&graph.all_nodes());
        assert_eq!(
            vec![id("x"), id("y")],
            splits.iter().map(|s| s.root_fragment()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_complete_source_unsolvable() {
        let graph = test_utils::read_graph(test_utils::CYCLE);
        let mut source = CompleteSplitSource::new(&graph);
        assert!(source.compute_splits(&graph.all_nodes()).is_empty());
    }

    #[test]
    fn test_filtering_source() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        let y = id("y");
        let mut source = FilteringSplitSource::new(
            CompleteSplitSource::new(&graph),
            |_: &Subgraph, s: &Split| s.root_fragment() == y,
        );
        let splits = source.compute_splits(&graph.all_nodes());
        assert_eq!(1, splits.len());
        assert_eq!(y, splits[0].root_fragment());
    }

    #[test]
    fn test_filtering_source_keeps_first_split() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let id = |s: &str| graph.node_set().get_node_id(&s.to_string()).unwrap();
        let mut source =
            FilteringSplitSource::new(CompleteSplitSource::new(&graph), |_: &Subgraph, _: &Split| false);
        let splits = source.compute_splits(&graph.all_nodes());
        assert_eq!(1, splits.len());
        assert_eq!(id("x"), splits[0].root_fragment());
    }

    #[test]
    fn test_filter_chart() {
        let graph = test_utils::read_graph(test_utils::THREE_QUANTIFIERS);
        let mut chart = ChartSolver::solve_graph(&graph).unwrap();
        let size_before = chart.size();
        let first_root = graph.roots()[0];
        filter_chart(&mut chart, |subgraph: &Subgraph, s: &Split| {
            !subgraph.contains(first_root) || s.root_fragment() == first_root
        })
        .unwrap();
        assert_eq!(1, chart.splits_for(&graph.all_nodes()).len());
        assert!(chart.size() < size_before);
        assert_eq!(BigUint::from(2u32), chart.count_solved_forms());
    }

    #[test]
    fn test_filter_chart_accept_all() {
        let graph = test_utils::read_graph(test_utils::THREE_QUANTIFIERS);
        let mut chart = ChartSolver::solve_graph(&graph).unwrap();
        let before = chart.to_string();
        filter_chart(&mut chart, |_: &Subgraph, _: &Split| true).unwrap();
        assert_eq!(before, chart.to_string());
    }

    macro_rules! split_source_tests {
        ($name:ident, $source:ident) => {
            paste! {
                #[test]
                fn [<test_ $name _solves_every_man_loves_a_woman>]() {
                    let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
                    let mut chart = Chart::new();
                    let mut source = $source(&graph);
                    assert!(ChartSolver::solve(&graph, &mut chart, &mut source));
                    assert!(chart.count_solved_forms() >= BigUint::from(1u32));
                }

                #[test]
                fn [<test_ $name _detects_unsolvable_graph>]() {
                    let graph = test_utils::read_graph(test_utils::CYCLE);
                    let mut chart = Chart::new();
                    let mut source = $source(&graph);
                    assert!(!ChartSolver::solve(&graph, &mut chart, &mut source));
                }

                #[test]
                fn [<test_ $name _splits_are_partitions>]() {
                    let graph = test_utils::read_graph(test_utils::THREE_QUANTIFIERS);
                    let mut source = $source(&graph);
                    let all_nodes = graph.all_nodes();
                    for split in source.compute_splits(&all_nodes) {
                        let mut union = graph.fragment(split.root_fragment());
                        for wcc in split.all_subgraphs() {
                            assert!(wcc.is_disjoint(&union));
                            union.extend(wcc.iter());
                        }
                        assert_eq!(all_nodes, union);
                    }
                }
            }
        };
    }

    fn complete_source(graph: &DomGraph<String>) -> CompleteSplitSource<'_, String> {
        CompleteSplitSource::new(graph)
    }

    fn even_root_source(graph: &DomGraph<String>) -> impl SplitSource + '_ {
        FilteringSplitSource::new(CompleteSplitSource::new(graph), |_: &Subgraph, s: &Split| {
            s.root_fragment() % 2 == 0
        })
    }

    split_source_tests!(complete, complete_source);

    split_source_tests!(filtering, even_root_source);
}
