use super::{DomGraph, LabelType, Subgraph};
use std::iter::Peekable;

/// Computes the weakly connected components of the subgraph induced by a set of nodes.
///
/// Edges of both kinds are followed in both directions, but only between nodes of the subgraph.
/// Components are returned in the order of their smallest node id.
pub(crate) fn weakly_connected_components<T>(
    graph: &DomGraph<T>,
    subgraph: &Subgraph,
) -> Vec<Subgraph>
where
    T: LabelType,
{
    let mut in_connected_components = vec![false; graph.n_nodes()];
    let mut next = subgraph.iter().peekable();
    let mut connected_components = Vec::new();
    while let Some(first) = next.next() {
        let current = find_connected_component_of(
            graph,
            subgraph,
            first,
            &mut in_connected_components,
            &mut next,
        );
        connected_components.push(current);
    }
    connected_components
}

fn find_connected_component_of<T, I>(
    graph: &DomGraph<T>,
    subgraph: &Subgraph,
    node: usize,
    in_connected_components: &mut [bool],
    next: &mut Peekable<I>,
) -> Subgraph
where
    T: LabelType,
    I: Iterator<Item = usize>,
{
    in_connected_components[node] = true;
    let mut current = Subgraph::new();
    current.insert(node);
    let mut newly_in_current = vec![node];
    let update_next = |n: &mut Peekable<I>, icc: &[bool]| {
        while let Some(node) = n.peek() {
            if icc[*node] {
                n.next();
            } else {
                break;
            }
        }
    };
    update_next(next, in_connected_components);
    while let Some(n) = newly_in_current.pop() {
        graph.incident_edges(n).for_each(|e| {
            let other = e.other_end(n);
            if subgraph.contains(other) && !in_connected_components[other] {
                in_connected_components[other] = true;
                current.insert(other);
                newly_in_current.push(other);
            }
        });
        update_next(next, in_connected_components);
    }
    current
}
