use super::{
    app_helper::{init_logger, init_logger_with_level},
    command::Command,
    writable_string::WritableString,
};
use anyhow::{anyhow, Context, Result};
use clap::{App, AppSettings, Arg};
use log::info;
use std::{ffi::OsString, str::FromStr};
use sysinfo::System;

/// Handles the set of commands and dispatches the CLI arguments to the selected one.
pub(crate) struct CliManager<'a> {
    app_name: &'a str,
    version: &'a str,
    authors: &'a str,
    about: &'a str,
    commands: Vec<Box<dyn Command<'a> + 'a>>,
}

const ARG_LOGGING_LEVEL: &str = "LOGGING_LEVEL";

const HELP_STRINGS: [&str; 3] = ["help", "-h", "--help"];

/// The argument setting the logging level, shared by all the commands.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .multiple(false)
        .default_value("info")
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .help("set the minimal logging level")
}

impl<'a> CliManager<'a> {
    pub(crate) fn new(app_name: &'a str, version: &'a str, authors: &'a str, about: &'a str) -> Self {
        CliManager {
            app_name,
            version,
            authors,
            about,
            commands: vec![],
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command<'a> + 'a>) {
        self.commands.push(command);
    }

    fn clap_app(&self) -> App<'a, 'a> {
        let mut app = App::new(self.app_name)
            .global_setting(AppSettings::DisableVersion)
            .global_setting(AppSettings::VersionlessSubcommands)
            .setting(AppSettings::NeedsSubcommandHelp)
            .setting(AppSettings::SubcommandRequired)
            .version(self.version)
            .author(self.authors)
            .about(self.about);
        for c in self.commands.iter() {
            app = app.subcommand(c.clap_subcommand());
        }
        app
    }

    pub(crate) fn parse_cli<I, T>(&self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = args
            .into_iter()
            .map(|a| a.into())
            .collect::<Vec<OsString>>();
        let mut app = self.clap_app();
        match app.clone().get_matches_from_safe(args.iter()) {
            Ok(matches) => {
                let (name, sub_matches) = matches.subcommand();
                let command = self
                    .commands
                    .iter()
                    .find(|c| c.name() == name)
                    .ok_or_else(|| anyhow!("no such command: {}", name))?;
                let sub_matches =
                    sub_matches.ok_or_else(|| anyhow!("missing arguments for command {}", name))?;
                let log_level = match sub_matches.value_of(ARG_LOGGING_LEVEL) {
                    Some(l) => log::LevelFilter::from_str(l)
                        .map_err(|e| anyhow!("invalid logging level {:?}: {}", l, e))?,
                    None => log::LevelFilter::Info,
                };
                init_logger_with_level(log_level);
                info!("{} {}", self.app_name, self.version);
                sys_info();
                command.execute(sub_matches)
            }
            Err(clap::Error {
                kind: clap::ErrorKind::HelpDisplayed,
                ..
            }) => {
                init_logger();
                self.log_help(&mut app, &args)
            }
            Err(e) => {
                init_logger();
                info!("{} {}", self.app_name, self.version);
                Err(anyhow!("{}", e))
            }
        }
    }

    fn log_help(&self, app: &mut App, args: &[OsString]) -> Result<()> {
        let arg_str = |i: usize| args.get(i).and_then(|a| a.to_str());
        let subcommand_name = match (arg_str(1), arg_str(2)) {
            (Some(a), Some(b)) if HELP_STRINGS.contains(&a) => Some(b),
            (Some(a), _) if !HELP_STRINGS.contains(&a) => Some(a),
            _ => None,
        };
        let mut message = WritableString::default();
        match subcommand_name.and_then(|n| self.commands.iter().find(|c| c.name() == n)) {
            Some(c) => c.clap_subcommand().write_long_help(&mut message),
            None => app.write_long_help(&mut message),
        }
        .context("while writing the help message")?;
        message.lines().for_each(|s| info!("{}", s));
        info!("");
        Ok(())
    }
}

fn sys_info() {
    info!("----------------------------------------");
    let sys = System::new_all();
    let unknown = || "[unknown]".to_string();
    info!("running on {}", System::host_name().unwrap_or_else(unknown));
    info!(
        "OS is {} {} with kernel {}",
        System::name().unwrap_or_else(unknown),
        System::os_version().unwrap_or_else(unknown),
        System::kernel_version().unwrap_or_else(unknown)
    );
    let mut cpu_kinds: Vec<&str> = sys.cpus().iter().map(|p| p.brand()).collect();
    cpu_kinds.sort_unstable();
    cpu_kinds.dedup();
    info!(
        "physical core count: {} {:?}",
        sys.physical_core_count()
            .map(|n| n.to_string())
            .unwrap_or_else(unknown),
        cpu_kinds
    );
    info!("total memory: {} KB", sys.total_memory() / 1024);
    info!("----------------------------------------");
}
