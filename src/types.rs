//! Core types for lexirank
//!
//! This module defines the records exchanged with callers (sections,
//! ranking results, graph nodes and edges) and the configuration for both
//! pipelines.

use crate::errors::{LexiRankError, Result};
use crate::nlp::tokenizer::{CONCEPT_MIN_LENGTH, SIMILARITY_MIN_LENGTH};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Ranking records
// ============================================================================

/// A candidate section supplied to the relevance ranker
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Extracted plain text; a missing field reads as empty
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub page_number: u32,
    #[serde(default)]
    pub document_name: String,
    #[serde(default)]
    pub document_id: String,
}

impl Section {
    /// Create a section with the given id and content
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Builder method: set title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder method: set page number
    pub fn with_page(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Builder method: set the owning document
    pub fn with_document(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.document_id = id.into();
        self.document_name = name.into();
        self
    }
}

/// A ranked section with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimilarityResult {
    pub section: Section,
    /// Cosine similarity scaled to [0, 100]
    pub relevance_score: f64,
    /// Human-readable reason for the match
    pub explanation: String,
    /// The rank (1-indexed, based on score)
    pub rank: usize,
}

// ============================================================================
// Graph records
// ============================================================================

/// A document supplied to the concept graph builder
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Create a document from a name and its extracted text
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Kind of graph node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Concept,
    Document,
    /// Declared for visualization surfaces; the builder does not emit it
    Topic,
}

/// Kind of graph edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeType {
    /// Two concepts appeared in the same document
    #[serde(rename = "co-occurrence")]
    CoOccurrence,
    /// A document contains one of its top concepts
    #[serde(rename = "semantic")]
    Semantic,
}

/// A node in the concept graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// `concept-<term>` or `doc-<index>`
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Visual weight
    pub size: f64,
    pub color: String,
    /// Number of documents contributing to this node
    pub frequency: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
}

/// An undirected edge in the concept graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: f64,
    pub label: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl GraphEdge {
    /// Check whether this edge joins `a` and `b` in either direction
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// Nodes and edges of one graph build
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    /// Look up a node by id
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// All edges joining `a` and `b`, in either direction
    pub fn edges_between<'a>(&'a self, a: &'a str, b: &'a str) -> impl Iterator<Item = &'a GraphEdge> {
        self.edges.iter().filter(move |e| e.connects(a, b))
    }

    /// Check if the graph has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node and edge counts by kind
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats::default();
        for node in &self.nodes {
            match node.node_type {
                NodeType::Concept => stats.concept_nodes += 1,
                NodeType::Document => stats.document_nodes += 1,
                NodeType::Topic => stats.topic_nodes += 1,
            }
        }
        for edge in &self.edges {
            match edge.edge_type {
                EdgeType::CoOccurrence => stats.cooccurrence_edges += 1,
                EdgeType::Semantic => stats.membership_edges += 1,
            }
        }
        stats
    }
}

/// Summary counts for a [`GraphData`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub concept_nodes: usize,
    pub document_nodes: usize,
    pub topic_nodes: usize,
    pub cooccurrence_edges: usize,
    pub membership_edges: usize,
}

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for relevance ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankConfig {
    /// Minimum term length in characters
    pub min_term_length: usize,
    /// Shared terms quoted in each explanation
    pub max_explanation_terms: usize,
    /// Number of results to return (0 = all)
    pub top_n: usize,
    /// Drop results scoring below this percentage
    pub min_score: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            min_term_length: SIMILARITY_MIN_LENGTH,
            max_explanation_terms: 3,
            top_n: 0,
            min_score: 0.0,
        }
    }
}

impl RankConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_term_length == 0 {
            return Err(LexiRankError::invalid_config("rank.min_term_length must be > 0"));
        }

        if !(0.0..=100.0).contains(&self.min_score) {
            return Err(LexiRankError::invalid_config(format!(
                "rank.min_score must be between 0 and 100, got {}",
                self.min_score
            )));
        }

        Ok(())
    }

    /// Builder method: set top N results to return
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Builder method: set minimum score
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Builder method: set minimum term length
    pub fn with_min_term_length(mut self, min_term_length: usize) -> Self {
        self.min_term_length = min_term_length;
        self
    }

    /// Builder method: set explanation term count
    pub fn with_max_explanation_terms(mut self, n: usize) -> Self {
        self.max_explanation_terms = n;
        self
    }
}

/// Configuration for concept graph construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Minimum term length in characters
    pub min_term_length: usize,
    /// Concepts extracted per document
    pub concepts_per_document: usize,
    /// Concepts each document node links to
    pub linked_concepts_per_document: usize,
    /// Concept node size: `min(max_node_size, base_node_size + frequency * size_per_occurrence)`
    pub base_node_size: f64,
    pub size_per_occurrence: f64,
    pub max_node_size: f64,
    pub document_node_size: f64,
    /// Range of the randomized base weight of a new co-occurrence edge
    pub edge_weight_min: f64,
    pub edge_weight_max: f64,
    /// Added each time a co-occurrence repeats
    pub edge_weight_increment: f64,
    /// Weight of document -> concept edges
    pub membership_weight: f64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            min_term_length: CONCEPT_MIN_LENGTH,
            concepts_per_document: 20,
            linked_concepts_per_document: 3,
            base_node_size: 20.0,
            size_per_occurrence: 8.0,
            max_node_size: 80.0,
            document_node_size: 30.0,
            edge_weight_min: 0.5,
            edge_weight_max: 1.0,
            edge_weight_increment: 0.1,
            membership_weight: 0.8,
        }
    }
}

impl GraphConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of a concept node seen in `frequency` documents
    pub fn concept_size(&self, frequency: u32) -> f64 {
        (self.base_node_size + frequency as f64 * self.size_per_occurrence).min(self.max_node_size)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.min_term_length == 0 {
            return Err(LexiRankError::invalid_config("graph.min_term_length must be > 0"));
        }

        if self.concepts_per_document == 0 {
            return Err(LexiRankError::invalid_config(
                "graph.concepts_per_document must be > 0",
            ));
        }

        if self.linked_concepts_per_document > self.concepts_per_document {
            return Err(LexiRankError::invalid_config(
                "graph.linked_concepts_per_document must be <= concepts_per_document",
            ));
        }

        if !(self.edge_weight_min >= 0.0 && self.edge_weight_min < self.edge_weight_max) {
            return Err(LexiRankError::invalid_config(format!(
                "graph edge weight range must satisfy 0 <= min < max, got [{}, {})",
                self.edge_weight_min, self.edge_weight_max
            )));
        }

        if self.max_node_size < self.base_node_size {
            return Err(LexiRankError::invalid_config(
                "graph.max_node_size must be >= base_node_size",
            ));
        }

        Ok(())
    }

    /// Builder method: set concepts per document
    pub fn with_concepts_per_document(mut self, n: usize) -> Self {
        self.concepts_per_document = n;
        self
    }

    /// Builder method: set linked concepts per document
    pub fn with_linked_concepts(mut self, n: usize) -> Self {
        self.linked_concepts_per_document = n;
        self
    }

    /// Builder method: set minimum term length
    pub fn with_min_term_length(mut self, min_term_length: usize) -> Self {
        self.min_term_length = min_term_length;
        self
    }

    /// Builder method: set the base edge weight range
    pub fn with_edge_weight_range(mut self, min: f64, max: f64) -> Self {
        self.edge_weight_min = min;
        self.edge_weight_max = max;
        self
    }
}

/// Combined configuration for both pipelines
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiConfig {
    pub rank: RankConfig,
    pub graph: GraphConfig,
}

impl LexiConfig {
    /// Validate both sections
    pub fn validate(&self) -> Result<()> {
        self.rank.validate()?;
        self.graph.validate()
    }

    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LexiRankError::io(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Self::from_json_str(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        assert!(LexiConfig::default().validate().is_ok());

        let bad = RankConfig::default().with_min_score(150.0);
        assert!(bad.validate().is_err());

        let bad = RankConfig::default().with_min_term_length(0);
        assert!(bad.validate().is_err());

        let bad = GraphConfig::default().with_linked_concepts(30);
        assert!(bad.validate().is_err());

        let bad = GraphConfig::default().with_edge_weight_range(1.0, 0.5);
        assert!(bad.validate().is_err());

        let bad = GraphConfig::default().with_concepts_per_document(0);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_concept_size_is_capped() {
        let cfg = GraphConfig::default();

        assert_eq!(cfg.concept_size(1), 28.0);
        assert_eq!(cfg.concept_size(2), 36.0);
        assert_eq!(cfg.concept_size(7), 76.0);
        assert_eq!(cfg.concept_size(8), 80.0);
        assert_eq!(cfg.concept_size(100), 80.0);
    }

    #[test]
    fn test_config_partial_json_uses_defaults() {
        let cfg = LexiConfig::from_json_str(r#"{"rank": {"top_n": 5}}"#).unwrap();

        assert_eq!(cfg.rank.top_n, 5);
        assert_eq!(cfg.rank.min_term_length, 3);
        assert_eq!(cfg.graph, GraphConfig::default());
    }

    #[test]
    fn test_config_json_rejects_invalid_values() {
        let err = LexiConfig::from_json_str(r#"{"graph": {"concepts_per_document": 0}}"#)
            .unwrap_err();
        assert!(matches!(err, LexiRankError::InvalidConfig { .. }));
    }

    #[test]
    fn test_config_missing_file() {
        let err = LexiConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LexiRankError::Io { .. }));
    }

    #[test]
    fn test_section_serde_camel_case() {
        let json = r#"{"id": "s1", "title": "Intro", "content": "text",
                       "pageNumber": 4, "documentName": "D1", "documentId": "d1"}"#;
        let section: Section = serde_json::from_str(json).unwrap();

        assert_eq!(section.page_number, 4);
        assert_eq!(section.document_name, "D1");
        assert_eq!(section.document_id, "d1");
    }

    #[test]
    fn test_section_missing_content_is_empty() {
        let section: Section = serde_json::from_str(r#"{"id": "s1"}"#).unwrap();
        assert!(section.content.is_empty());
    }

    #[test]
    fn test_node_and_edge_type_serde() {
        assert_eq!(serde_json::to_string(&NodeType::Concept).unwrap(), r#""concept""#);
        assert_eq!(serde_json::to_string(&NodeType::Topic).unwrap(), r#""topic""#);
        assert_eq!(
            serde_json::to_string(&EdgeType::CoOccurrence).unwrap(),
            r#""co-occurrence""#
        );
        assert_eq!(serde_json::to_string(&EdgeType::Semantic).unwrap(), r#""semantic""#);
    }

    #[test]
    fn test_graph_stats_and_lookup() {
        let node = |id: &str, node_type| GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            node_type,
            size: 20.0,
            color: "#000000".to_string(),
            frequency: 1,
            document: None,
        };
        let graph = GraphData {
            nodes: vec![
                node("concept-alpha", NodeType::Concept),
                node("doc-0", NodeType::Document),
            ],
            edges: vec![GraphEdge {
                id: "doc-0--concept-alpha".to_string(),
                source: "doc-0".to_string(),
                target: "concept-alpha".to_string(),
                weight: 0.8,
                label: "contains".to_string(),
                edge_type: EdgeType::Semantic,
            }],
        };

        let stats = graph.stats();
        assert_eq!(stats.concept_nodes, 1);
        assert_eq!(stats.document_nodes, 1);
        assert_eq!(stats.membership_edges, 1);
        assert!(graph.node("doc-0").is_some());
        assert_eq!(graph.edges_between("concept-alpha", "doc-0").count(), 1);
    }
}
