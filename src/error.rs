use std::fmt;

use crate::document::document_model::NodeId;

#[derive(Debug)]
pub enum HPathError {
    /// Reading or writing a file failed (snapshot, report, trace)
    Io { path: String, source: std::io::Error },

    /// Snapshot content could not be parsed as JSON
    SnapshotParse { context: String, source: serde_json::Error },

    /// Snapshot content could not be parsed as YAML
    SnapshotYaml { context: String, source: serde_yaml::Error },

    /// Serializing a result (reduced tree, report) failed
    Serialize(String),

    /// A node id does not exist in the document
    UnknownNode(NodeId),

    /// Style or geometry was requested for a node that is not an element
    NotAnElement(NodeId),

    /// No default computed style is available for a probed tag
    MissingDefaultStyle { tag: String },

    /// Simplification left more than one top-level node
    MultipleRoots(usize),

    /// A target given on the command line could not be interpreted
    InvalidTarget(String),
}

impl fmt::Display for HPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HPathError::Io { path, source } => {
                write!(f, "I/O error on '{}': {}", path, source)
            }
            HPathError::SnapshotParse { context, source } => {
                write!(f, "JSON parse error ({}): {}", context, source)
            }
            HPathError::SnapshotYaml { context, source } => {
                write!(f, "YAML parse error ({}): {}", context, source)
            }
            HPathError::Serialize(msg) => {
                write!(f, "Serialization failed: {}", msg)
            }
            HPathError::UnknownNode(id) => {
                write!(f, "Node {} does not exist in the document", id)
            }
            HPathError::NotAnElement(id) => {
                write!(f, "Node {} is not an element", id)
            }
            HPathError::MissingDefaultStyle { tag } => {
                write!(f, "No default style available for <{}>", tag)
            }
            HPathError::MultipleRoots(count) => {
                write!(f, "Document simplified to {} top-level nodes, expected one", count)
            }
            HPathError::InvalidTarget(msg) => {
                write!(f, "Invalid target: {}", msg)
            }
        }
    }
}

impl std::error::Error for HPathError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HPathError::Io { source, .. } => Some(source),
            HPathError::SnapshotParse { source, .. } => Some(source),
            HPathError::SnapshotYaml { source, .. } => Some(source),
            _ => None,
        }
    }
}
