use anyhow::Result;
use clap::{App, ArgMatches};

/// A subcommand of the app.
///
/// Each command declares its own CLI arguments through clap and runs itself given their values.
/// Command names must be unique.
pub(crate) trait Command<'a> {
    /// Returns the name of the command, as typed on the command line.
    fn name(&self) -> &str;

    /// Returns the clap subcommand describing the CLI arguments of this command.
    fn clap_subcommand(&self) -> App<'a, 'a>;

    /// Executes the command given the values of its arguments.
    ///
    /// The app exits with a success status iff `Ok(())` is returned.
    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}
