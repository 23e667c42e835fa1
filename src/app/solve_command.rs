use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use domchart::{
    chart::{ChartSolver, SolvedFormIterator},
    io::{DomconReader, DomconWriter, SolutionWriter},
};
use log::info;
use std::io::Write;

const CMD_NAME: &str = "solve";

const ARG_MAX: &str = "MAX";
const ARG_COUNT_ONLY: &str = "COUNT_ONLY";

pub(crate) struct SolveCommand;

impl SolveCommand {
    pub(crate) fn new() -> Self {
        SolveCommand
    }
}

impl<'a> Command<'a> for SolveCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Enumerates the solved forms of a graph")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(
                Arg::with_name(ARG_MAX)
                    .long("max")
                    .empty_values(false)
                    .multiple(false)
                    .help("the maximal number of solved forms to display")
                    .required(false),
            )
            .arg(
                Arg::with_name(ARG_COUNT_ONLY)
                    .long("count-only")
                    .takes_value(false)
                    .help("only display the number of solved forms")
                    .required(false)
                    .conflicts_with(ARG_MAX),
            )
            .arg(common::no_compactify_arg())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .context("missing input file")?;
        let max = arg_matches
            .value_of(ARG_MAX)
            .map(|m| {
                m.parse::<usize>()
                    .with_context(|| format!("invalid maximal number of solved forms: {:?}", m))
            })
            .transpose()?;
        let graph = common::prepare_graph(
            common::read_file_path(file, &mut DomconReader::default())?,
            !arg_matches.is_present(common::ARG_NO_COMPACTIFY),
        );
        let writer = DomconWriter::default();
        let mut out = std::io::stdout();
        let mut chart = match ChartSolver::solve_graph(&graph) {
            Some(c) => c,
            None => {
                info!("the graph is unsolvable");
                return SolutionWriter::<String>::write_unsolvable(&writer, &mut out);
            }
        };
        let count = chart.count_solved_forms();
        info!("the graph has {} solved form(s)", count);
        if arg_matches.is_present(ARG_COUNT_ONLY) {
            writeln!(out, "{}", count).context("while writing the solved form count")?;
            return out.flush().context("while writing the solved form count");
        }
        let mut n_written = 0;
        for solved_form in SolvedFormIterator::new(&chart, &graph).take(max.unwrap_or(usize::MAX)) {
            writer.write_solved_form(&mut out, &graph, &solved_form)?;
            n_written += 1;
        }
        info!("displayed {} solved form(s)", n_written);
        Ok(())
    }
}
