use super::{cli_manager::logging_level_cli_arg, command::Command, common};
use anyhow::{Context, Result};
use clap::{App, AppSettings, ArgMatches, SubCommand};
use domchart::{
    graph::{classify, GraphProperty},
    io::DomconReader,
};
use std::io::Write;
use strum::IntoEnumIterator;

const CMD_NAME: &str = "check";

pub(crate) struct CheckCommand;

impl CheckCommand {
    pub(crate) fn new() -> Self {
        CheckCommand
    }
}

impl<'a> Command<'a> for CheckCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'a, 'a> {
        SubCommand::with_name(CMD_NAME)
            .about("Checks an input graph for errors and displays its properties")
            .setting(AppSettings::DisableVersion)
            .arg(common::input_args())
            .arg(logging_level_cli_arg())
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file = arg_matches
            .value_of(common::ARG_INPUT)
            .context("missing input file")?;
        let graph = common::read_file_path(file, &mut DomconReader::default())?;
        let classification = classify(&graph);
        let mut out = std::io::stdout();
        for property in GraphProperty::iter() {
            writeln!(
                out,
                "{}: {}",
                property.as_ref(),
                if classification.has(property) { "yes" } else { "no" }
            )
            .context("while writing graph properties")?;
        }
        out.flush().context("while writing graph properties")
    }
}
