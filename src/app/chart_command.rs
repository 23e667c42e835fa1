use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use domchart::{
    chart::{Chart, ChartSolver, CompleteSplitSource},
    io::{DomconReader, DomconWriter, SolutionWriter},
};
use log::{info, warn};

const CMD_NAME: &str = "chart";

pub(crate) struct ChartCommand;

impl ChartCommand {
    pub(crate) fn new() -> Self {
        ChartCommand
    }
}

impl<'a> Command<'a> for ChartCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Displays the chart of a graph")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(common::no_compactify_arg())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .context("missing input file")?;
        let graph = common::prepare_graph(
            common::read_file_path(file, &mut DomconReader::default())?,
            !arg_matches.is_present(common::ARG_NO_COMPACTIFY),
        );
        let writer = DomconWriter::default();
        let mut out = std::io::stdout();
        let mut chart = Chart::new();
        let mut split_source = CompleteSplitSource::new(&graph);
        if !ChartSolver::solve(&graph, &mut chart, &mut split_source) {
            warn!("the graph is unsolvable");
            return SolutionWriter::<String>::write_unsolvable(&writer, &mut out);
        }
        info!(
            "the chart has {} split(s) for {} subgraph(s) and represents {} solved form(s)",
            chart.size(),
            chart.count_subgraphs(),
            chart.count_solved_forms()
        );
        writer.write_chart(&graph, &chart, &mut out)
    }
}
