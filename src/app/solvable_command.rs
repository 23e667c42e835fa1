use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use domchart::{
    chart::ChartSolver,
    io::{DomconReader, DomconWriter, SolutionWriter},
};
use log::info;

const CMD_NAME: &str = "solvable";

pub(crate) struct SolvableCommand;

impl SolvableCommand {
    pub(crate) fn new() -> Self {
        SolvableCommand
    }
}

impl<'a> Command<'a> for SolvableCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks whether a graph has solved forms and counts them")
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
        match ChartSolver::solve_graph(&graph) {
            Some(mut chart) => {
                info!(
                    "the chart has {} split(s) for {} subgraph(s)",
                    chart.size(),
                    chart.count_subgraphs()
                );
                let count = chart.count_solved_forms();
                SolutionWriter::<String>::write_solvable(&writer, &mut out, &count)
            }
            None => SolutionWriter::<String>::write_unsolvable(&writer, &mut out),
        }
    }
}
