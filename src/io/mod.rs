//! Objects used to read and write dominance graphs and the answers computed from their charts.

mod domcon_reader;
pub use domcon_reader::DomconReader;

mod domcon_writer;
pub use domcon_writer::DomconWriter;

mod specs;
pub use specs::GraphReader;
pub use specs::SolutionWriter;
pub use specs::WarningHandler;

mod warning_result;
