use super::{Chart, CompleteSplitSource, SplitSource};
use crate::graph::{DomGraph, LabelType, Subgraph};
use log::debug;

/// Fills charts by computing the splits of subgraphs until a fixpoint is reached.
pub struct ChartSolver;

impl ChartSolver {
    /// Fills a chart with the splits of the graph given by a split source.
    ///
    /// The weakly connected components of the graph are registered as top-level subgraphs.
    /// Then, each subgraph that is not a singleton gets its splits from the source, and the subgraphs they refer to are processed in turn.
    ///
    /// Returns `false` if a subgraph has no split, meaning the graph is unsolvable; the chart is then partially filled.
    pub fn solve<T, S>(graph: &DomGraph<T>, chart: &mut Chart, split_source: &mut S) -> bool
    where
        T: LabelType,
        S: SplitSource + ?Sized,
    {
        let is_root = root_flags(graph);
        let mut to_process = Vec::new();
        for wcc in graph.wccs() {
            chart.add_toplevel_subgraph(wcc.clone());
            to_process.push(wcc);
        }
        while let Some(subgraph) = to_process.pop() {
            if chart.contains_split_for(&subgraph) || singleton_root(&is_root, &subgraph).is_some() {
                continue;
            }
            let splits = split_source.compute_splits(&subgraph);
            if splits.is_empty() {
                debug!("no free fragment in subgraph {}", subgraph);
                return false;
            }
            for split in splits {
                split
                    .all_subgraphs()
                    .for_each(|s| to_process.push(s.clone()));
                chart.add_split(&subgraph, split);
            }
        }
        debug!(
            "chart filled with {} split(s) for {} subgraph(s)",
            chart.size(),
            chart.count_subgraphs()
        );
        true
    }

    /// Builds the complete chart of a graph.
    ///
    /// Returns `None` if the graph is unsolvable.
    pub fn solve_graph<T>(graph: &DomGraph<T>) -> Option<Chart>
    where
        T: LabelType,
    {
        let mut chart = Chart::new();
        let mut split_source = CompleteSplitSource::new(graph);
        if ChartSolver::solve(graph, &mut chart, &mut split_source) {
            Some(chart)
        } else {
            None
        }
    }
}

pub(crate) fn root_flags<T>(graph: &DomGraph<T>) -> Vec<bool>
where
    T: LabelType,
{
    (0..graph.n_nodes()).map(|n| graph.is_root(n)).collect()
}

/// Returns the root of a subgraph containing exactly one root of the graph.
pub(crate) fn singleton_root(is_root: &[bool], subgraph: &Subgraph) -> Option<usize> {
    let mut roots = subgraph.iter().filter(|n| is_root[*n]);
    match (roots.next(), roots.next()) {
        (Some(r), None) => Some(r),
        _ => None,
    }
}
