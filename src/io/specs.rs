use crate::chart::SolvedForm;
use crate::graph::{DomGraph, LabelType};
use anyhow::{Context, Result};
use num_bigint::BigUint;
use std::io::{Read, Write};

/// The type of callback functions to call when warnings are raised while parsing a graph.
///
/// The arguments are the (1-based) line number and the warning message.
pub type WarningHandler = Box<dyn Fn(usize, String)>;

/// A trait implemented by objects able to read dominance graphs.
pub trait GraphReader<T>
where
    T: LabelType,
{
    /// Reads a [`DomGraph`].
    /// The [LabelType](crate::graph::LabelType) of the nodes of the returned graph depends on the reader.
    ///
    /// In case warnings are raised, the callback functions registered by [add_warning_handler](Self::add_warning_handler) are triggered.
    ///
    /// # Example
    ///
    /// ```
    /// # use domchart::graph::DomGraph;
    /// # use domchart::io::{DomconReader, GraphReader};
    /// fn read_graph_from_str(s: &str) -> DomGraph<String> {
    ///     let reader = DomconReader::default();
    ///     reader.read(&mut s.as_bytes()).expect("invalid domcon graph")
    /// }
    /// # read_graph_from_str("hole(a).");
    /// ```
    fn read(&self, reader: &mut dyn Read) -> Result<DomGraph<T>>;

    /// Adds a callback function to call when warnings are raised while parsing a graph.
    fn add_warning_handler(&mut self, h: WarningHandler);
}

/// A trait implemented by objects that write the answers computed from a chart.
pub trait SolutionWriter<T>
where
    T: LabelType,
{
    /// Writes the text associated with the fact the graph is unsolvable.
    fn write_unsolvable(&self, writer: &mut dyn Write) -> Result<()>;

    /// Writes the text associated with the fact the graph is solvable, with its number of solved forms.
    fn write_solvable(&self, writer: &mut dyn Write, count: &BigUint) -> Result<()>;

    /// Writes a single solved form.
    fn write_solved_form(
        &self,
        writer: &mut dyn Write,
        graph: &DomGraph<T>,
        solved_form: &SolvedForm,
    ) -> Result<()>;
}

pub(crate) fn write_unsolvable(writer: &mut dyn Write) -> Result<()> {
    let context = "while writing the graph is unsolvable";
    writeln!(writer, "NO").context(context)?;
    writer.flush().context(context)
}

pub(crate) fn write_solvable(writer: &mut dyn Write, count: &BigUint) -> Result<()> {
    let context = "while writing a solved form count";
    writeln!(writer, "YES {}", count).context(context)?;
    writer.flush().context(context)
}
