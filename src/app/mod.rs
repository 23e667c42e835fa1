mod app_helper;

mod authors_command;
pub(crate) use authors_command::AuthorsCommand;

mod chart_command;
pub(crate) use chart_command::ChartCommand;

mod check_command;
pub(crate) use check_command::CheckCommand;

mod cli_manager;

mod command;

pub(crate) mod common;

mod solvable_command;
pub(crate) use solvable_command::SolvableCommand;

mod solve_command;
pub(crate) use solve_command::SolveCommand;

mod writable_string;
