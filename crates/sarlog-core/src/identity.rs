//! # Identity Newtypes
//!
//! Handles and labels for graph vertices and goods. Nodes are referenced by
//! [`NodeId`] once inserted into a graph; [`NodeName`] is the human-facing
//! label and is unique within one graph.

use serde::{Deserialize, Serialize};

/// Stable handle of a node inside one logistics graph.
///
/// Handles are allocated by the graph in insertion order and are never
/// reused, so ordering handles reproduces insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Position of this node in the graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node:{}", self.0)
    }
}

/// Name of a supplier, hub, or mission.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeName(String);

impl NodeName {
    /// Wrap a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the underlying string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NodeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque label of a good ("Rope", "Water", "Blankets").
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Good(String);

impl Good {
    /// Wrap a good label.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Borrow the underlying label.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Good {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Good {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for Good {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_order_by_allocation() {
        assert!(NodeId(0) < NodeId(1));
        assert_eq!(NodeId(7).index(), 7);
    }

    #[test]
    fn display_forms() {
        assert_eq!(NodeId(3).to_string(), "node:3");
        assert_eq!(NodeName::from("hub1").to_string(), "hub1");
        assert_eq!(Good::from("Rope").to_string(), "Rope");
    }

    #[test]
    fn good_serializes_as_bare_string() {
        let json = serde_json::to_string(&Good::new("Water")).unwrap();
        assert_eq!(json, "\"Water\"");
        let back: Good = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "Water");
    }
}
