//! The dominance graphs the chart solver works on.

pub mod classification;
pub use classification::classify;
pub use classification::Classification;
pub use classification::GraphProperty;

mod connected_components;

mod dom_graph;
pub use dom_graph::DomGraph;
pub use dom_graph::Edge;
pub use dom_graph::EdgeType;
pub use dom_graph::NodeType;

mod node_set;
pub use node_set::LabelType;
pub use node_set::Node;
pub use node_set::NodeSet;

mod subgraph;
pub use subgraph::Subgraph;
