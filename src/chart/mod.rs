//! Charts, the compact representation of all the solved forms of a dominance graph.
//!
//! A chart is filled by a [`ChartSolver`] using a [`SplitSource`], then the solved forms are either counted by the chart itself or enumerated by a [`SolvedFormIterator`].

mod chart;
pub use chart::Chart;
pub use chart::ChartError;

mod chart_solver;
pub use chart_solver::ChartSolver;

mod solved_form;
pub use solved_form::DomEdge;
pub use solved_form::SolvedForm;

mod solved_form_iterator;
pub use solved_form_iterator::SolvedFormIterator;

mod split;
pub use split::Split;

mod split_computer;
pub use split_computer::SplitComputer;

mod split_source;
pub use split_source::filter_chart;
pub use split_source::CompleteSplitSource;
pub use split_source::FilteringSplitSource;
pub use split_source::SplitFilter;
pub use split_source::SplitSource;
