use super::{warning_result::WarningResult, GraphReader, WarningHandler};
use crate::graph::{DomGraph, EdgeType};
use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

const NAME_AND_SPACE_PATTERN: &str = r"\s*[_[:alpha:]][_[:alpha:]\d]*\s*";

lazy_static! {
    static ref LABEL_LINE_PATTERN: Regex =
        Regex::new(r"^\s*label\([^,()]+,[^,()]+\)\.\s*$").unwrap();
    static ref LABEL_LINE_NAMES_PATTERN: Regex = Regex::new(&format!(
        r"^\s*label\(({}),\s*([^,()\s][^,()]*?)\s*\)\.\s*$",
        NAME_AND_SPACE_PATTERN
    ))
    .unwrap();
    static ref HOLE_LINE_PATTERN: Regex = Regex::new(r"^\s*hole\([^()]+\)\.\s*$").unwrap();
    static ref HOLE_LINE_NAME_PATTERN: Regex =
        Regex::new(&format!(r"^\s*hole\(({})\)\.\s*$", NAME_AND_SPACE_PATTERN)).unwrap();
    static ref EDGE_LINE_PATTERN: Regex =
        Regex::new(r"^\s*(tree|dom)\([^,()]+,[^,()]+\)\.\s*$").unwrap();
    static ref EDGE_LINE_NAMES_PATTERN: Regex = Regex::new(&format!(
        r"^\s*(tree|dom)\(({}),\s*({})\)\.\s*$",
        NAME_AND_SPACE_PATTERN, NAME_AND_SPACE_PATTERN,
    ))
    .unwrap();
}

enum NodeDeclaration {
    Labelled(String, String),
    Hole(String),
}

impl NodeDeclaration {
    fn name(&self) -> &str {
        match self {
            NodeDeclaration::Labelled(n, _) | NodeDeclaration::Hole(n) => n,
        }
    }
}

fn captured_name(c: &Captures, i: usize) -> WarningResult<String, String> {
    let str_name = c.get(i).map(|m| m.as_str()).unwrap_or_default();
    let trimmed_str_name = str_name.trim().to_string();
    if trimmed_str_name.len() == str_name.len() {
        WarningResult::Ok(trimmed_str_name)
    } else {
        WarningResult::Warned(
            trimmed_str_name,
            vec!["node names beginning or ending by spaces may be ambiguous".to_string()],
        )
    }
}

fn try_read_node_line<T>(l: T) -> Result<Option<WarningResult<NodeDeclaration, String>>>
where
    T: AsRef<str>,
{
    let l = l.as_ref();
    if LABEL_LINE_PATTERN.is_match(l) {
        return match LABEL_LINE_NAMES_PATTERN.captures(l) {
            Some(c) => {
                let label = c.get(2).map(|m| m.as_str()).unwrap_or_default().to_string();
                Ok(Some(
                    captured_name(&c, 1).map(|n| NodeDeclaration::Labelled(n, label)),
                ))
            }
            None => Err(anyhow!("invalid node name or label in {}", l.trim())),
        };
    }
    if HOLE_LINE_PATTERN.is_match(l) {
        return match HOLE_LINE_NAME_PATTERN.captures(l) {
            Some(c) => Ok(Some(captured_name(&c, 1).map(NodeDeclaration::Hole))),
            None => Err(anyhow!("invalid node name in {}", l.trim())),
        };
    }
    Ok(None)
}

type EdgeDeclaration = (EdgeType, (String, String));

fn try_read_edge_line<T>(l: T) -> Result<Option<WarningResult<EdgeDeclaration, String>>>
where
    T: AsRef<str>,
{
    let l = l.as_ref();
    if EDGE_LINE_PATTERN.is_match(l) {
        match EDGE_LINE_NAMES_PATTERN.captures(l) {
            Some(c) => {
                let kind = match c.get(1).map(|m| m.as_str()) {
                    Some("tree") => EdgeType::Tree,
                    _ => EdgeType::Dominance,
                };
                Ok(Some(
                    captured_name(&c, 2)
                        .zip(captured_name(&c, 3))
                        .map(|names| (kind, names)),
                ))
            }
            None => Err(anyhow!("invalid node names in {}", l.trim())),
        }
    } else {
        Ok(None)
    }
}

/// A reader for the domcon format.
///
/// This object is used to read a [`DomGraph`] encoded in a Prolog-like text format.
/// The [LabelType](crate::graph::LabelType) of the returned graphs is [String].
///
/// # Domcon format
///
/// Each line declares a node or an edge.
/// Labelled nodes are declared by `label(name, label).`, holes by `hole(name).`.
/// Tree edges are declared by `tree(from, to).` and dominance edges by `dom(from, to).`.
/// All nodes must be declared before the first edge.
///
/// The following content defines the graph of the sentence "every man loves a woman" (with the restrictions omitted).
///
/// ```text
/// label(x, every).
/// hole(xh).
/// label(y, a).
/// hole(yh).
/// label(z, love).
/// tree(x, xh).
/// tree(y, yh).
/// dom(xh, z).
/// dom(yh, z).
/// ```
///
/// # Example
///
/// ```
/// # use domchart::graph::DomGraph;
/// # use domchart::io::{DomconReader, GraphReader};
/// let reader = DomconReader::default();
/// let graph = reader.read(&mut "label(x, f).\nhole(xh).\ntree(x, xh).\n".as_bytes()).unwrap();
/// assert_eq!(2, graph.n_nodes());
/// assert_eq!(1, graph.n_edges());
/// ```
#[derive(Default)]
pub struct DomconReader {
    warning_handlers: Vec<WarningHandler>,
}

impl GraphReader<String> for DomconReader {
    fn read(&self, reader: &mut dyn Read) -> Result<DomGraph<String>> {
        let mut graph = DomGraph::new();
        let mut edges_started = false;
        let br = BufReader::new(reader);
        for (i, line) in br.lines().enumerate() {
            let context = || format!("while reading line with index {}", i);
            let warn = |w: &str| {
                self.warning_handlers
                    .iter()
                    .for_each(|h| (h)(1 + i, w.to_string()));
            };
            let warning_consumer = |warnings: Vec<String>| warnings.iter().for_each(|w| warn(w));
            let l = &line.with_context(context)?;
            if l.trim().is_empty() {
                continue;
            }
            if let Some(result) = try_read_node_line(l).with_context(context)? {
                if edges_started {
                    return Err(anyhow!("found a node declaration after an edge"))
                        .with_context(context);
                }
                let declaration = result.consume_warnings(warning_consumer);
                if graph.node_set().contains(&declaration.name().to_string()) {
                    warn("node declared twice; the first declaration is kept");
                    continue;
                }
                match declaration {
                    NodeDeclaration::Labelled(n, label) => graph.new_labelled_node(n, &label),
                    NodeDeclaration::Hole(n) => graph.new_hole(n),
                };
                continue;
            }
            if let Some(result) = try_read_edge_line(l).with_context(context)? {
                edges_started = true;
                let (kind, (a, b)) = result.consume_warnings(warning_consumer);
                graph.new_edge(&a, &b, kind).with_context(context)?;
                continue;
            }
            return Err(anyhow!("syntax error in line \"{}\"", l)).with_context(context);
        }
        Ok(graph)
    }

    fn add_warning_handler(&mut self, h: WarningHandler) {
        self.warning_handlers.push(h);
    }
}
