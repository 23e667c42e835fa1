use super::chart_solver::{root_flags, singleton_root};
use super::{Chart, DomEdge, SolvedForm, Split};
use crate::graph::{DomGraph, LabelType, Subgraph};
use log::warn;
use std::sync::Arc;

/// An iterator over the solved forms represented by a chart.
///
/// Solved forms are computed lazily, one at a time, by a transition system walking the chart.
/// The state is made of an agenda of subgraphs still to resolve and a stack of frames, one for each subgraph whose split is currently chosen.
///
/// Random access to solved forms is provided by [`get_solved_form`](Self::get_solved_form),
/// which runs an independent enumeration and keeps the solved forms it has seen in memory.
/// Indices are limited to [`usize`] and every solved form up to the index is cached,
/// so this is only suitable for small indices even if the chart counts many more solved forms.
///
/// # Example
///
/// ```
/// # use domchart::chart::{ChartSolver, SolvedFormIterator};
/// # use domchart::io::{DomconReader, GraphReader};
/// let graph = DomconReader::default().read(&mut "label(x, f).\nhole(xh).\nlabel(y, g).\ntree(x, xh).\ndom(xh, y).\n".as_bytes()).unwrap();
/// let chart = ChartSolver::solve_graph(&graph).unwrap();
/// let solved_forms = SolvedFormIterator::new(&chart, &graph).collect::<Vec<_>>();
/// assert_eq!(1, solved_forms.len());
/// assert_eq!("[(1,2)]", solved_forms[0].to_string());
/// ```
pub struct SolvedFormIterator<'a> {
    state: EnumerationState<'a>,
    random_access_state: EnumerationState<'a>,
    random_access_cache: Vec<SolvedForm>,
}

impl<'a> SolvedFormIterator<'a> {
    /// Builds an iterator over the solved forms of a chart filled for the given graph.
    ///
    /// If the chart lacks the splits of a subgraph that is not a singleton, no solved form is produced.
    pub fn new<T>(chart: &'a Chart, graph: &DomGraph<T>) -> Self
    where
        T: LabelType,
    {
        let is_root = root_flags(graph);
        SolvedFormIterator {
            state: EnumerationState::new(chart, is_root.clone()),
            random_access_state: EnumerationState::new(chart, is_root),
            random_access_cache: Vec::new(),
        }
    }

    /// Returns `true` iff a call to `next` would return a solved form.
    pub fn has_next(&self) -> bool {
        self.state.buffered.is_some()
    }

    /// Returns the solved form at the given index in the enumeration order, or `None` if there are not so many solved forms.
    ///
    /// This function does not interfere with the iteration.
    pub fn get_solved_form(&mut self, index: usize) -> Option<SolvedForm> {
        while self.random_access_cache.len() <= index {
            let solved_form = self.random_access_state.next_solved_form()?;
            self.random_access_cache.push(solved_form);
        }
        Some(self.random_access_cache[index].clone())
    }
}

impl Iterator for SolvedFormIterator<'_> {
    type Item = SolvedForm;

    fn next(&mut self) -> Option<Self::Item> {
        self.state.next_solved_form()
    }
}

#[derive(Clone, Copy)]
struct AgendaEntry<'a> {
    dominator: Option<usize>,
    subgraph: &'a Subgraph,
}

struct Frame<'a> {
    dominator: Option<usize>,
    splits: &'a [Arc<Split>],
    cursor: usize,
    edge_accu: Vec<DomEdge>,
    agenda_snapshot: Vec<AgendaEntry<'a>>,
}

impl Frame<'_> {
    fn is_exhausted(&self) -> bool {
        self.cursor + 1 >= self.splits.len()
    }
}

struct EnumerationState<'a> {
    chart: &'a Chart,
    is_root: Vec<bool>,
    agenda: Vec<AgendaEntry<'a>>,
    stack: Vec<Frame<'a>>,
    buffered: Option<SolvedForm>,
    pushed_frame: bool,
    missing_splits: bool,
}

impl<'a> EnumerationState<'a> {
    fn new(chart: &'a Chart, is_root: Vec<bool>) -> Self {
        let agenda = chart
            .toplevel_subgraphs()
            .iter()
            .rev()
            .map(|subgraph| AgendaEntry {
                dominator: None,
                subgraph,
            })
            .collect();
        let mut state = EnumerationState {
            chart,
            is_root,
            agenda,
            stack: Vec::new(),
            buffered: None,
            pushed_frame: false,
            missing_splits: false,
        };
        state.buffered = state.find_next_solved_form();
        if state.buffered.is_none() && !state.pushed_frame && !state.missing_splits {
            state.buffered = Some(SolvedForm::default());
        }
        state
    }

    fn next_solved_form(&mut self) -> Option<SolvedForm> {
        let current = self.buffered.take();
        if current.is_some() {
            self.buffered = self.find_next_solved_form();
        }
        current
    }

    fn is_finished(&self) -> bool {
        self.agenda.is_empty() && self.stack.is_empty()
    }

    fn find_next_solved_form(&mut self) -> Option<SolvedForm> {
        while !self.is_finished() {
            self.step();
            if self.agenda.is_empty() && !self.stack.is_empty() {
                return Some(self.extract_solved_form());
            }
        }
        None
    }

    fn step(&mut self) {
        match self.agenda.pop() {
            None => {
                while self.stack.last().map(|f| f.is_exhausted()).unwrap_or(false) {
                    self.stack.pop();
                }
                self.step_to_next_split();
            }
            Some(entry) => self.step_down(entry),
        }
    }

    fn step_to_next_split(&mut self) {
        let split = match self.stack.last_mut() {
            None => return,
            Some(top) => {
                top.edge_accu.clear();
                top.cursor += 1;
                let split: &'a Split = &top.splits[top.cursor];
                if let Some(d) = top.dominator {
                    top.edge_accu.push(DomEdge::new(d, split.root_fragment()));
                }
                self.agenda = top.agenda_snapshot.clone();
                split
            }
        };
        self.expand(split);
    }

    fn step_down(&mut self, entry: AgendaEntry<'a>) {
        if let Some(root) = singleton_root(&self.is_root, entry.subgraph) {
            if let (Some(d), Some(top)) = (entry.dominator, self.stack.last_mut()) {
                top.edge_accu.push(DomEdge::new(d, root));
            }
            return;
        }
        let splits: &'a [Arc<Split>] = self.chart.splits_for(entry.subgraph);
        let first: &'a Split = match splits.first() {
            Some(s) => s,
            None => {
                warn!("no split in chart for subgraph {}", entry.subgraph);
                self.missing_splits = true;
                self.agenda.clear();
                self.stack.clear();
                return;
            }
        };
        let mut frame = Frame {
            dominator: entry.dominator,
            splits,
            cursor: 0,
            edge_accu: Vec::new(),
            agenda_snapshot: self.agenda.clone(),
        };
        if let Some(d) = entry.dominator {
            frame.edge_accu.push(DomEdge::new(d, first.root_fragment()));
        }
        self.stack.push(frame);
        self.pushed_frame = true;
        self.expand(first);
    }

    fn expand(&mut self, split: &'a Split) {
        for (dominator, wcc) in split.iter_wccs() {
            match singleton_root(&self.is_root, wcc) {
                Some(root) => {
                    if let Some(top) = self.stack.last_mut() {
                        top.edge_accu.push(DomEdge::new(dominator, root));
                    }
                }
                None => self.agenda.push(AgendaEntry {
                    dominator: Some(dominator),
                    subgraph: wcc,
                }),
            }
        }
    }

    fn extract_solved_form(&self) -> SolvedForm {
        self.stack
            .iter()
            .flat_map(|f| f.edge_accu.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSolver;
    use crate::test_utils;
    use num_bigint::BigUint;
    use std::collections::HashSet;

    fn named_edges(graph: &DomGraph<String>, solved_form: &SolvedForm) -> Vec<(String, String)> {
        let mut edges = solved_form
            .edges()
            .iter()
            .map(|e| (graph.name(e.source()).clone(), graph.name(e.target()).clone()))
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges
    }

    fn pairs(edges: &[(&str, &str)]) -> Vec<(String, String)> {
        edges
            .iter()
            .map(|(s, t)| (s.to_string(), t.to_string()))
            .collect()
    }

    #[test]
    fn test_every_man_loves_a_woman() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let chart = ChartSolver::solve_graph(&graph).unwrap();
        let mut iterator = SolvedFormIterator::new(&chart, &graph);
        assert!(iterator.has_next());
        let first = iterator.next().unwrap();
        assert_eq!(pairs(&[("xh", "y"), ("yh", "z")]), named_edges(&graph, &first));
        assert!(iterator.has_next());
        let second = iterator.next().unwrap();
        assert_eq!(pairs(&[("xh", "z"), ("yh", "x")]), named_edges(&graph, &second));
        assert!(!iterator.has_next());
        assert!(iterator.next().is_none());
        assert!(iterator.next().is_none());
    }

    #[test]
    fn test_two_node_subgraph() {
        let graph = test_utils::read_graph(
            r#"
            hole(a).
            label(b, f).
            dom(a, b).
            "#,
        );
        let mut chart = ChartSolver::solve_graph(&graph).unwrap();
        assert_eq!(BigUint::from(1u32), chart.count_solved_forms_for(&graph.all_nodes()));
        let solved_forms = SolvedFormIterator::new(&chart, &graph).collect::<Vec<_>>();
        assert_eq!(1, solved_forms.len());
        assert_eq!(pairs(&[("a", "b")]), named_edges(&graph, &solved_forms[0]));
    }

    #[test]
    fn test_count_matches_enumeration() {
        for text in [
            test_utils::EVERY_MAN_LOVES_A_WOMAN,
            test_utils::THREE_QUANTIFIERS,
            test_utils::TWO_COMPONENTS,
        ] {
            let graph = test_utils::read_graph(text);
            let mut chart = ChartSolver::solve_graph(&graph).unwrap();
            let solved_forms = SolvedFormIterator::new(&chart, &graph).collect::<Vec<_>>();
            assert_eq!(
                chart.count_solved_forms(),
                BigUint::from(solved_forms.len())
            );
            let distinct = solved_forms.iter().collect::<HashSet<_>>();
            assert_eq!(solved_forms.len(), distinct.len());
        }
    }

    #[test]
    fn test_solved_forms_are_forests() {
        let graph = test_utils::read_graph(test_utils::THREE_QUANTIFIERS);
        let chart = ChartSolver::solve_graph(&graph).unwrap();
        for solved_form in SolvedFormIterator::new(&chart, &graph) {
            let solved_graph = graph.with_dominance_edges(&solved_form);
            for n in 0..solved_graph.n_nodes() {
                let n_parents = solved_graph.in_edges(n, None).count();
                assert!(n_parents <= 1);
            }
            assert_eq!(1, solved_graph.roots().iter().filter(|r| solved_graph.in_edges(**r, None).count() == 0).count());
        }
    }

    #[test]
    fn test_single_fragment_has_empty_solved_form() {
        let graph = test_utils::read_graph(
            r#"
            label(a, f).
            hole(ah).
            tree(a, ah).
            "#,
        );
        let chart = ChartSolver::solve_graph(&graph).unwrap();
        let solved_forms = SolvedFormIterator::new(&chart, &graph).collect::<Vec<_>>();
        assert_eq!(vec![SolvedForm::default()], solved_forms);
    }

    #[test]
    fn test_empty_graph() {
        let graph = DomGraph::<String>::new();
        let mut chart = ChartSolver::solve_graph(&graph).unwrap();
        assert_eq!(BigUint::from(1u32), chart.count_solved_forms());
        assert_eq!(1, SolvedFormIterator::new(&chart, &graph).count());
    }

    #[test]
    fn test_unsolvable_graph() {
        let graph = test_utils::read_graph(test_utils::CYCLE);
        let mut chart = Chart::new();
        let mut source = crate::chart::CompleteSplitSource::new(&graph);
        assert!(!ChartSolver::solve(&graph, &mut chart, &mut source));
        let mut iterator = SolvedFormIterator::new(&chart, &graph);
        assert!(!iterator.has_next());
        assert!(iterator.next().is_none());
        assert!(iterator.get_solved_form(0).is_none());
    }

    #[test]
    fn test_get_solved_form() {
        let graph = test_utils::read_graph(test_utils::THREE_QUANTIFIERS);
        let chart = ChartSolver::solve_graph(&graph).unwrap();
        let all = SolvedFormIterator::new(&chart, &graph).collect::<Vec<_>>();
        let mut iterator = SolvedFormIterator::new(&chart, &graph);
        assert_eq!(Some(all[4].clone()), iterator.get_solved_form(4));
        assert_eq!(Some(all[1].clone()), iterator.get_solved_form(1));
        assert!(iterator.get_solved_form(6).is_none());
        assert_eq!(Some(all[0].clone()), iterator.next());
        assert_eq!(Some(all[5].clone()), iterator.get_solved_form(5));
        assert_eq!(5, iterator.count());
    }
}
