use super::{
    app_helper::AppHelper, command::Command, AuthorsCommand, ChartCommand, CheckCommand,
    SolvableCommand, SolveCommand,
};
use anyhow::{Context, Result};
use clap::Arg;
use domchart::{
    graph::{classify, DomGraph, GraphProperty, LabelType},
    io::GraphReader,
};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{BufReader, Read},
    path::PathBuf,
};

pub(crate) fn create_app_helper() -> AppHelper<'static> {
    let app_name = option_env!("CARGO_PKG_NAME").unwrap_or("unknown app name");
    let app_version = option_env!("CARGO_PKG_VERSION").unwrap_or("unknown version");
    let authors = option_env!("CARGO_PKG_AUTHORS").unwrap_or("unknown authors");
    let mut app = AppHelper::new(
        app_name,
        app_version,
        authors,
        "Domchart, a chart-based solver for dominance graphs.",
    );
    let commands: Vec<Box<dyn Command<'static>>> = vec![
        Box::new(AuthorsCommand::new(app_name, app_version, authors)),
        Box::new(ChartCommand::new()),
        Box::new(CheckCommand::new()),
        Box::new(SolvableCommand::new()),
        Box::new(SolveCommand::new()),
    ];
    for c in commands {
        app.add_command(c);
    }
    app
}

pub(crate) const ARG_INPUT: &str = "INPUT";

pub(crate) fn input_args() -> Arg<'static, 'static> {
    Arg::with_name(ARG_INPUT)
        .short("f")
        .empty_values(false)
        .multiple(false)
        .help("the input file that contains the dominance graph")
        .required(true)
}

pub(crate) const ARG_NO_COMPACTIFY: &str = "NO_COMPACTIFY";

pub(crate) fn no_compactify_arg() -> Arg<'static, 'static> {
    Arg::with_name(ARG_NO_COMPACTIFY)
        .long("no-compactify")
        .takes_value(false)
        .help("do not compactify the graph before solving it")
        .required(false)
}

pub(crate) fn read_file_path<T>(
    file_path: &str,
    reader: &mut dyn GraphReader<T>,
) -> Result<DomGraph<T>>
where
    T: LabelType,
{
    reader.add_warning_handler(Box::new(|line: usize, msg: String| warn!("at line {}: {}", line, msg)));
    let graph = read_file_path_with(file_path, &|r: &mut dyn Read| reader.read(r))?;
    info!(
        "the dominance graph has {} node(s) and {} edge(s)",
        graph.n_nodes(),
        graph.n_edges(),
    );
    Ok(graph)
}

pub(crate) fn read_file_path_with<F, R>(file_path: &str, reader: &F) -> Result<R>
where
    F: Fn(&mut dyn Read) -> Result<R>,
{
    let canonicalized = canonicalize_file_path(file_path)?;
    info!("reading input file {:?}", canonicalized);
    let mut file_reader = BufReader::new(
        File::open(&canonicalized)
            .with_context(|| format!("while opening file {:?}", canonicalized))?,
    );
    (reader)(&mut file_reader)
}

/// Canonicalize a path given by the user.
pub(crate) fn canonicalize_file_path(file_path: &str) -> Result<PathBuf> {
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

/// Compactifies the graph if it is allowed, needed and possible.
pub(crate) fn prepare_graph<T>(graph: DomGraph<T>, allow_compactification: bool) -> DomGraph<T>
where
    T: LabelType,
{
    let classification = classify(&graph);
    if classification.has(GraphProperty::Compact) {
        return graph;
    }
    if !classification.has(GraphProperty::Compactifiable) {
        warn!("the graph is neither compact nor compactifiable");
        return graph;
    }
    if !allow_compactification {
        info!("the graph is not compact; compactification is disabled");
        return graph;
    }
    let compact = graph.compactify();
    info!(
        "compactified the graph to {} node(s) and {} edge(s)",
        compact.n_nodes(),
        compact.n_edges()
    );
    compact
}
