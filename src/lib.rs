//! Domchart is a chart-based solver for dominance graphs.
//!
//! A dominance graph is made of tree fragments connected by dominance edges.
//! Its solved forms are the ways to plug the fragments into each other so that every dominance edge is satisfied.
//! This crate computes a chart, a compact representation of all the solved forms, from which they can be counted or enumerated one at a time.

#![warn(missing_docs)]

pub mod chart;

pub mod graph;

pub mod io;

#[cfg(test)]
pub(crate) mod test_utils;
