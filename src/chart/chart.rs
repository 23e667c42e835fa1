use super::Split;
use crate::graph::Subgraph;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use thiserror::Error;

/// The errors raised by chart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A subgraph cannot be deleted (or lose all its splits) while other splits or the top-level list refer to it.
    #[error("subgraph {subgraph} is still referenced {ref_count} time(s)")]
    StillReferenced {
        /// the subgraph the operation was applied to
        subgraph: Subgraph,
        /// its current reference count
        ref_count: usize,
    },
}

/// A compact representation of all the solved forms of a dominance graph.
///
/// The chart maps subgraphs to the splits that resolve them.
/// Each subgraph is reference counted: its count is the number of splits in the chart that refer to it, plus one if it is a top-level subgraph.
/// Subgraphs whose count drops to zero are removed, together with the subgraphs only they refer to.
///
/// Splits are shared: cloning a chart produces an independent structure whose splits are the same objects as the original's.
#[derive(Clone, Debug, Default)]
pub struct Chart {
    splits: HashMap<Subgraph, Vec<Arc<Split>>>,
    ref_counts: HashMap<Subgraph, usize>,
    toplevel_subgraphs: Vec<Subgraph>,
    size: usize,
    solved_form_counts: HashMap<Subgraph, BigUint>,
}

impl Chart {
    /// Builds an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a split to the ones of a subgraph, and increments the reference counts of the subgraphs it refers to.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::chart::{Chart, Split};
    /// # use domchart::graph::Subgraph;
    /// let subgraph = [0, 1].into_iter().collect::<Subgraph>();
    /// let child = [1].into_iter().collect::<Subgraph>();
    /// let mut split = Split::new(0);
    /// split.add_wcc(0, child.clone());
    /// let mut chart = Chart::new();
    /// chart.add_split(&subgraph, split);
    /// assert_eq!(1, chart.size());
    /// assert_eq!(1, chart.reference_count(&child));
    /// ```
    pub fn add_split<S>(&mut self, subgraph: &Subgraph, split: S)
    where
        S: Into<Arc<Split>>,
    {
        let split = split.into();
        split
            .all_subgraphs()
            .for_each(|s| *self.ref_counts.entry(s.clone()).or_insert(0) += 1);
        match self.splits.get_mut(subgraph) {
            Some(v) => v.push(split),
            None => {
                self.splits.insert(subgraph.clone(), vec![split]);
            }
        }
        self.size += 1;
        self.solved_form_counts.clear();
    }

    /// Replaces all the splits of a subgraph.
    ///
    /// The subgraphs that are no longer referenced after the replacement are deleted (see [`delete_subgraph`](Self::delete_subgraph)).
    /// Setting an empty list of splits removes the subgraph from the chart.
    ///
    /// If the new list is empty while the subgraph is still referenced, an error is returned and the chart is left unchanged.
    pub fn set_splits_for_subgraph(
        &mut self,
        subgraph: &Subgraph,
        splits: Vec<Arc<Split>>,
    ) -> Result<(), ChartError> {
        let ref_count = self.reference_count(subgraph);
        if splits.is_empty() && ref_count > 0 {
            return Err(ChartError::StillReferenced {
                subgraph: subgraph.clone(),
                ref_count,
            });
        }
        let old_splits = self.splits.remove(subgraph).unwrap_or_default();
        self.size -= old_splits.len();
        let mut touched = Vec::new();
        for split in old_splits.iter() {
            for s in split.all_subgraphs() {
                self.decrement_ref_count(s);
                touched.push(s.clone());
            }
        }
        for split in splits {
            self.add_split(subgraph, split);
        }
        touched.sort_unstable();
        touched.dedup();
        touched.retain(|s| self.reference_count(s) == 0);
        self.cascade_deletion(touched);
        self.solved_form_counts.clear();
        Ok(())
    }

    /// Removes a subgraph and its splits from the chart.
    ///
    /// The reference counts of the subgraphs its splits refer to are decremented, and those reaching zero are deleted in turn.
    ///
    /// If the subgraph is still referenced, an error is returned and the chart is left unchanged.
    pub fn delete_subgraph(&mut self, subgraph: &Subgraph) -> Result<(), ChartError> {
        let ref_count = self.reference_count(subgraph);
        if ref_count > 0 {
            return Err(ChartError::StillReferenced {
                subgraph: subgraph.clone(),
                ref_count,
            });
        }
        self.cascade_deletion(vec![subgraph.clone()]);
        self.solved_form_counts.clear();
        Ok(())
    }

    fn cascade_deletion(&mut self, mut to_delete: Vec<Subgraph>) {
        while let Some(subgraph) = to_delete.pop() {
            debug_assert_eq!(0, self.reference_count(&subgraph));
            if let Some(old_splits) = self.splits.remove(&subgraph) {
                self.size -= old_splits.len();
                for split in old_splits.iter() {
                    for s in split.all_subgraphs() {
                        if self.decrement_ref_count(s) == 0 {
                            to_delete.push(s.clone());
                        }
                    }
                }
            }
        }
    }

    fn decrement_ref_count(&mut self, subgraph: &Subgraph) -> usize {
        match self.ref_counts.get_mut(subgraph) {
            Some(n) if *n > 1 => {
                *n -= 1;
                *n
            }
            Some(_) => {
                self.ref_counts.remove(subgraph);
                0
            }
            None => {
                debug_assert!(false, "no reference count for {}", subgraph);
                0
            }
        }
    }

    /// Returns the splits of a subgraph; the slice is empty if the chart has none.
    pub fn splits_for(&self, subgraph: &Subgraph) -> &[Arc<Split>] {
        self.splits
            .get(subgraph)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` iff the chart has at least one split for the subgraph.
    pub fn contains_split_for(&self, subgraph: &Subgraph) -> bool {
        self.splits
            .get(subgraph)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    /// Returns the number of times a subgraph is referenced.
    pub fn reference_count(&self, subgraph: &Subgraph) -> usize {
        self.ref_counts.get(subgraph).copied().unwrap_or(0)
    }

    /// Returns the number of subgraphs having splits in the chart.
    pub fn count_subgraphs(&self) -> usize {
        self.splits.len()
    }

    /// Returns the number of (subgraph, split) couples in the chart.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Iterates over the subgraphs having splits in the chart, in no particular order.
    pub fn iter_subgraphs(&self) -> impl Iterator<Item = &Subgraph> + '_ {
        self.splits.keys()
    }

    /// Registers a top-level subgraph.
    ///
    /// Top-level subgraphs are pinned: their reference count is incremented, so they cannot be deleted.
    pub fn add_toplevel_subgraph(&mut self, subgraph: Subgraph) {
        *self.ref_counts.entry(subgraph.clone()).or_insert(0) += 1;
        self.toplevel_subgraphs.push(subgraph);
        self.solved_form_counts.clear();
    }

    /// Returns the top-level subgraphs, in registration order.
    pub fn toplevel_subgraphs(&self) -> &[Subgraph] {
        &self.toplevel_subgraphs
    }

    /// Returns the number of solved forms represented by the chart.
    ///
    /// It is the product of the solved form counts of the top-level subgraphs.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::chart::ChartSolver;
    /// # use domchart::io::{DomconReader, GraphReader};
    /// # use num_bigint::BigUint;
    /// let graph = DomconReader::default().read(&mut "label(x, f).\nhole(xh).\nlabel(y, g).\ntree(x, xh).\ndom(xh, y).\n".as_bytes()).unwrap();
    /// let mut chart = ChartSolver::solve_graph(&graph).unwrap();
    /// assert_eq!(BigUint::from(1u32), chart.count_solved_forms());
    /// ```
    pub fn count_solved_forms(&mut self) -> BigUint {
        let toplevel_subgraphs = self.toplevel_subgraphs.clone();
        toplevel_subgraphs
            .iter()
            .fold(BigUint::one(), |acc, s| acc * self.count_solved_forms_for(s))
    }

    /// Returns the number of solved forms of a subgraph.
    ///
    /// A subgraph without split counts for one solved form; otherwise, each split contributes the product of the counts of the subgraphs it refers to.
    /// Results are memoized until the next mutation of the chart.
    pub fn count_solved_forms_for(&mut self, subgraph: &Subgraph) -> BigUint {
        if let Some(count) = self.solved_form_counts.get(subgraph) {
            return count.clone();
        }
        let splits = match self.splits.get(subgraph) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => return BigUint::one(),
        };
        let mut count = BigUint::zero();
        for split in splits.iter() {
            let mut product = BigUint::one();
            for s in split.all_subgraphs() {
                product *= self.count_solved_forms_for(s);
            }
            count += product;
        }
        self.solved_form_counts
            .insert(subgraph.clone(), count.clone());
        count
    }
}

impl Display for Chart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut subgraphs = self.splits.keys().collect::<Vec<&Subgraph>>();
        subgraphs.sort_unstable();
        for subgraph in subgraphs {
            for split in self.splits[subgraph].iter() {
                writeln!(f, "{} -> {}", subgraph, split)?;
            }
        }
        Ok(())
    }
}
