use super::SolutionWriter;
use crate::chart::{Chart, SolvedForm, Split};
use crate::graph::{DomGraph, LabelType, Subgraph};
use anyhow::{Context, Result};
use num_bigint::BigUint;
use std::io::Write;

/// A writer for the domcon format.
///
/// This object writes graphs in the format read by [`DomconReader`](super::DomconReader),
/// and the solved forms and charts computed from them using the names of the nodes.
///
/// # Example
///
/// The following example reads a graph and writes it back to the standard output.
///
/// ```
/// # use domchart::io::{DomconReader, DomconWriter, GraphReader};
/// let graph = DomconReader::default().read(&mut "label(x, f).\nhole(xh).\ntree(x, xh).\n".as_bytes()).unwrap();
/// DomconWriter::default().write_graph(&graph, &mut std::io::stdout()).unwrap();
/// ```
#[derive(Default)]
pub struct DomconWriter {}

impl DomconWriter {
    /// Writes a graph using the domcon format to the provided writer.
    pub fn write_graph<T: LabelType>(&self, graph: &DomGraph<T>, writer: &mut dyn Write) -> Result<()> {
        let context = "while writing a graph";
        for n in 0..graph.n_nodes() {
            match graph.label(n) {
                Some(l) => writeln!(writer, "label({}, {}).", graph.name(n), l),
                None => writeln!(writer, "hole({}).", graph.name(n)),
            }
            .context(context)?;
        }
        for edge in graph.iter_edges() {
            writeln!(
                writer,
                "{}({}, {}).",
                edge.kind().as_ref(),
                graph.name(edge.source()),
                graph.name(edge.target())
            )
            .context(context)?;
        }
        writer.flush().context(context)
    }

    /// Writes the content of a chart, one line per couple made of a subgraph and one of its splits.
    ///
    /// Node ids are replaced by their names; subgraphs are written in ascending order.
    pub fn write_chart<T: LabelType>(
        &self,
        graph: &DomGraph<T>,
        chart: &Chart,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let context = "while writing a chart";
        let mut subgraphs = chart.iter_subgraphs().collect::<Vec<&Subgraph>>();
        subgraphs.sort_unstable();
        for subgraph in subgraphs {
            for split in chart.splits_for(subgraph) {
                writeln!(
                    writer,
                    "{} -> {}",
                    named_subgraph(graph, subgraph),
                    named_split(graph, split)
                )
                .context(context)?;
            }
        }
        writer.flush().context(context)
    }
}

fn named_subgraph<T: LabelType>(graph: &DomGraph<T>, subgraph: &Subgraph) -> String {
    let names = subgraph
        .iter()
        .map(|n| graph.name(n).to_string())
        .collect::<Vec<String>>();
    format!("{{{}}}", names.join(", "))
}

fn named_split<T: LabelType>(graph: &DomGraph<T>, split: &Split) -> String {
    let dominators = split
        .all_dominators()
        .map(|d| {
            let wccs = split
                .wccs(d)
                .unwrap_or_default()
                .iter()
                .map(|w| named_subgraph(graph, w))
                .collect::<Vec<String>>();
            format!("{}=[{}]", graph.name(d), wccs.join(", "))
        })
        .collect::<Vec<String>>();
    format!(
        "<{} {{{}}}>",
        graph.name(split.root_fragment()),
        dominators.join(", ")
    )
}

impl<T> SolutionWriter<T> for DomconWriter
where
    T: LabelType,
{
    fn write_unsolvable(&self, writer: &mut dyn Write) -> Result<()> {
        super::specs::write_unsolvable(writer)
    }

    fn write_solvable(&self, writer: &mut dyn Write, count: &BigUint) -> Result<()> {
        super::specs::write_solvable(writer, count)
    }

    fn write_solved_form(
        &self,
        writer: &mut dyn Write,
        graph: &DomGraph<T>,
        solved_form: &SolvedForm,
    ) -> Result<()> {
        let context = "while writing a solved form";
        write!(writer, "[").context(context)?;
        let mut first = true;
        solved_form.edges().iter().try_for_each(|e| {
            let sep = if first { "" } else { "," };
            first = false;
            write!(
                writer,
                "{}({},{})",
                sep,
                graph.name(e.source()),
                graph.name(e.target())
            )
            .context(context)
        })?;
        writeln!(writer, "]").context(context)?;
        writer.flush().context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartSolver;
    use crate::io::{DomconReader, GraphReader};
    use crate::test_utils;
    use std::io::BufWriter;

    fn written<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> Result<()>,
    {
        let mut buffer = BufWriter::new(Vec::new());
        f(&mut buffer).unwrap();
        String::from_utf8(buffer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_write_graph() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let text = written(|w| DomconWriter::default().write_graph(&graph, w));
        assert_eq!(
            "label(x, every).\nhole(xh).\nlabel(y, a).\nhole(yh).\nlabel(z, love).\ntree(x, xh).\ntree(y, yh).\ndom(xh, z).\ndom(yh, z).\n",
            text
        );
        let reread = DomconReader::default()
            .read(&mut text.as_bytes())
            .unwrap();
        assert_eq!(graph.n_nodes(), reread.n_nodes());
        assert_eq!(graph.n_edges(), reread.n_edges());
    }

    #[test]
    fn test_write_solved_form() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let solved_form = SolvedForm::new(vec![(3, 0), (1, 4)]);
        let text = written(|w| DomconWriter::default().write_solved_form(w, &graph, &solved_form));
        assert_eq!("[(xh,z),(yh,x)]\n", text);
    }

    #[test]
    fn test_write_answers() {
        let writer = DomconWriter::default();
        assert_eq!(
            "NO\n",
            written(|w| SolutionWriter::<String>::write_unsolvable(&writer, w))
        );
        assert_eq!(
            "YES 42\n",
            written(|w| SolutionWriter::<String>::write_solvable(&writer, w, &BigUint::from(42u32)))
        );
    }

    #[test]
    fn test_write_chart() {
        let graph = test_utils::read_graph(test_utils::EVERY_MAN_LOVES_A_WOMAN);
        let chart = ChartSolver::solve_graph(&graph).unwrap();
        let text = written(|w| DomconWriter::default().write_chart(&graph, &chart, w));
        assert_eq!(
            "{x, xh, y, yh, z} -> <x {xh=[{y, yh, z}]}>\n{x, xh, y, yh, z} -> <y {yh=[{x, xh, z}]}>\n{x, xh, z} -> <x {xh=[{z}]}>\n{y, yh, z} -> <y {yh=[{z}]}>\n",
            text
        );
    }
}
