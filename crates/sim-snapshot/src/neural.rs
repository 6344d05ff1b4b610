//! Neural Graph Types
//!
//! A creature's brain as exported by the simulation: neurons become nodes,
//! connections become weighted directed edges. Parallel edges between the same
//! ordered pair are kept.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::appearance::Rgb;
use crate::error::{Endpoint, SnapshotError};

/// Columns the neuron table must carry.
pub const NEURON_COLUMNS: [&str; 3] = ["ID", "Type", "Label"];

/// Columns the connection table must carry.
pub const CONNECTION_COLUMNS: [&str; 4] = ["SourceID", "TargetID", "Weight", "ActivationFunction"];

/// Behavioural bucket a neuron falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NeuronKind {
    Sensory,
    Output,
    /// Anything that is neither sensory nor output.
    Internal,
}

impl NeuronKind {
    /// Classifies a raw type string. Unknown types are internal.
    pub fn classify(type_name: &str) -> Self {
        match type_name {
            "SENSORY" => NeuronKind::Sensory,
            "OUTPUT" => NeuronKind::Output,
            _ => NeuronKind::Internal,
        }
    }

    /// Fill colour for nodes of this kind.
    pub fn colour(self) -> NodeColour {
        match self {
            NeuronKind::Sensory => NodeColour::SkyBlue,
            NeuronKind::Output => NodeColour::LightCoral,
            NeuronKind::Internal => NodeColour::LightGreen,
        }
    }
}

impl fmt::Display for NeuronKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeuronKind::Sensory => write!(f, "sensory"),
            NeuronKind::Output => write!(f, "output"),
            NeuronKind::Internal => write!(f, "internal"),
        }
    }
}

/// Node fill colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeColour {
    SkyBlue,
    LightCoral,
    LightGreen,
}

impl NodeColour {
    pub fn rgb(self) -> Rgb {
        match self {
            NodeColour::SkyBlue => Rgb::new(0.529_411_8, 0.807_843_1, 0.921_568_6),
            NodeColour::LightCoral => Rgb::new(0.941_176_5, 0.501_960_8, 0.501_960_8),
            NodeColour::LightGreen => Rgb::new(0.564_705_9, 0.933_333_3, 0.564_705_9),
        }
    }
}

/// A node of the neural graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Neuron {
    #[serde(rename = "ID")]
    pub id: u32,
    /// Raw type string from the export, e.g. `SENSORY` or `INTERNAL`.
    #[serde(rename = "Type")]
    pub type_name: String,
    #[serde(rename = "Label")]
    pub label: String,
}

impl Neuron {
    pub fn new(id: u32, type_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            type_name: type_name.into(),
            label: label.into(),
        }
    }

    pub fn kind(&self) -> NeuronKind {
        NeuronKind::classify(&self.type_name)
    }

    pub fn colour(&self) -> NodeColour {
        self.kind().colour()
    }
}

/// A weighted directed connection between two neurons.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Connection {
    #[serde(rename = "SourceID")]
    pub source_id: u32,
    #[serde(rename = "TargetID")]
    pub target_id: u32,
    #[serde(rename = "Weight")]
    pub weight: f64,
    /// Display-only tag such as `RELU` or `TANH`.
    #[serde(rename = "ActivationFunction")]
    pub activation_function: String,
}

impl Connection {
    pub fn new(
        source_id: u32,
        target_id: u32,
        weight: f64,
        activation_function: impl Into<String>,
    ) -> Self {
        Self {
            source_id,
            target_id,
            weight,
            activation_function: activation_function.into(),
        }
    }

    /// Weight formatted to two decimal places for edge annotations.
    pub fn weight_label(&self) -> String {
        format!("{:.2}", self.weight)
    }
}

/// An edge whose endpoints have been resolved to node indices.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub source: usize,
    pub target: usize,
    pub connection: Connection,
}

/// Directed multigraph of neurons and connections.
#[derive(Debug, Clone, Default)]
pub struct NeuralGraph {
    nodes: Vec<Neuron>,
    index: HashMap<u32, usize>,
    edges: Vec<Edge>,
}

/// Node and edge counts for one graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphSummary {
    pub sensory: usize,
    pub output: usize,
    pub internal: usize,
    pub edges: usize,
}

impl NeuralGraph {
    /// Builds the graph from neuron and connection rows.
    ///
    /// A repeated neuron id updates the existing node in place. Any connection
    /// naming an unknown neuron aborts construction with
    /// [`SnapshotError::DanglingReference`].
    pub fn build(neurons: Vec<Neuron>, connections: Vec<Connection>) -> Result<Self, SnapshotError> {
        let mut graph = NeuralGraph::default();

        for neuron in neurons {
            match graph.index.get(&neuron.id) {
                Some(&existing) => graph.nodes[existing] = neuron,
                None => {
                    graph.index.insert(neuron.id, graph.nodes.len());
                    graph.nodes.push(neuron);
                }
            }
        }

        for (i, connection) in connections.into_iter().enumerate() {
            let row = i + 1;
            let source = graph.resolve(connection.source_id, Endpoint::Source, row)?;
            let target = graph.resolve(connection.target_id, Endpoint::Target, row)?;
            graph.edges.push(Edge {
                source,
                target,
                connection,
            });
        }

        Ok(graph)
    }

    fn resolve(&self, neuron_id: u32, endpoint: Endpoint, row: usize) -> Result<usize, SnapshotError> {
        self.index
            .get(&neuron_id)
            .copied()
            .ok_or(SnapshotError::DanglingReference {
                row,
                endpoint,
                neuron_id,
            })
    }

    /// Nodes in first-seen order. A node's position here is its index.
    pub fn nodes(&self) -> &[Neuron] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the neuron with the given id.
    pub fn node_index(&self, id: u32) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Number of edges leaving the given node index.
    pub fn out_degree(&self, node: usize) -> usize {
        self.edges.iter().filter(|e| e.source == node).count()
    }

    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            edges: self.edges.len(),
            ..GraphSummary::default()
        };
        for neuron in &self.nodes {
            match neuron.kind() {
                NeuronKind::Sensory => summary.sensory += 1,
                NeuronKind::Output => summary.output += 1,
                NeuronKind::Internal => summary.internal += 1,
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neurons() -> Vec<Neuron> {
        vec![
            Neuron::new(0, "SENSORY", "L_n"),
            Neuron::new(16, "INTERNAL", "I_0"),
            Neuron::new(21, "OUTPUT", "M_n"),
        ]
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(NeuronKind::classify("SENSORY").colour(), NodeColour::SkyBlue);
        assert_eq!(NeuronKind::classify("OUTPUT").colour(), NodeColour::LightCoral);
        for other in ["INTERNAL", "CONSTANT", "UNKNOWN", "", "sensory"] {
            assert_eq!(NeuronKind::classify(other).colour(), NodeColour::LightGreen);
        }
    }

    #[test]
    fn test_build_graph() {
        let graph = NeuralGraph::build(
            neurons(),
            vec![
                Connection::new(0, 16, 0.5, "RELU"),
                Connection::new(16, 21, -1.25, "TANH"),
            ],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.edges()[1].source, 1);
        assert_eq!(graph.edges()[1].target, 2);
        assert_eq!(graph.nodes()[2].kind(), NeuronKind::Output);
    }

    #[test]
    fn test_parallel_edges_are_kept() {
        let graph = NeuralGraph::build(
            neurons(),
            vec![
                Connection::new(0, 16, 0.5, "RELU"),
                Connection::new(0, 16, 0.7, "SIGMOID"),
            ],
        )
        .unwrap();
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.out_degree(0), 2);
    }

    #[test]
    fn test_dangling_target_rejected() {
        let err = NeuralGraph::build(
            neurons(),
            vec![
                Connection::new(0, 16, 0.5, "RELU"),
                Connection::new(16, 99, 0.1, "RELU"),
            ],
        )
        .unwrap_err();

        match err {
            SnapshotError::DanglingReference {
                row,
                endpoint,
                neuron_id,
            } => {
                assert_eq!(row, 2);
                assert_eq!(endpoint, Endpoint::Target);
                assert_eq!(neuron_id, 99);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dangling_source_rejected() {
        let err = NeuralGraph::build(neurons(), vec![Connection::new(7, 0, 1.0, "RELU")]).unwrap_err();
        assert!(matches!(
            err,
            SnapshotError::DanglingReference {
                endpoint: Endpoint::Source,
                neuron_id: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_duplicate_neuron_updates_in_place() {
        let mut rows = neurons();
        rows.push(Neuron::new(0, "SENSORY", "L_n renamed"));
        let graph = NeuralGraph::build(rows, Vec::new()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.node_index(0), Some(0));
        assert_eq!(graph.nodes()[0].label, "L_n renamed");
    }

    #[test]
    fn test_weight_label_two_decimals() {
        assert_eq!(Connection::new(0, 0, 0.123_456, "RELU").weight_label(), "0.12");
        assert_eq!(Connection::new(0, 0, -2.0, "RELU").weight_label(), "-2.00");
    }

    #[test]
    fn test_summary() {
        let graph = NeuralGraph::build(neurons(), vec![Connection::new(0, 21, 1.0, "RELU")]).unwrap();
        assert_eq!(
            graph.summary(),
            GraphSummary {
                sensory: 1,
                output: 1,
                internal: 1,
                edges: 1,
            }
        );
    }
}
