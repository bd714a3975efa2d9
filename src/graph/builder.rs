//! Concept graph construction
//!
//! Each document contributes its most frequent terms as concept nodes, a
//! co-occurrence edge for every pair of those concepts, and a document node
//! linked to its leading concepts. Nodes and edges live in insertion-ordered
//! maps owned by a [`GraphAccumulator`], which is created per build and
//! consumed into a [`GraphData`] at the end.

use crate::graph::visuals::{RandomVisuals, VisualSource, DOCUMENT_COLOR};
use crate::nlp::tokenizer::Tokenizer;
use crate::types::{Document, EdgeType, GraphConfig, GraphData, GraphEdge, GraphNode, NodeType};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Label of document -> concept edges
pub const MEMBERSHIP_LABEL: &str = "contains";

/// Node id of a concept term
pub fn concept_id(term: &str) -> String {
    format!("concept-{}", term)
}

/// Node id of the document at `index` in the input
pub fn document_id(index: usize) -> String {
    format!("doc-{}", index)
}

fn edge_id(source: &str, target: &str) -> String {
    format!("{}--{}", source, target)
}

fn weight_label(weight: f64) -> String {
    format!("{:.1}", weight)
}

/// Uppercase the first character of `term`
fn capitalize(term: &str) -> String {
    let mut chars = term.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Insertion-ordered node and edge storage for one graph build
#[derive(Debug, Default)]
pub struct GraphAccumulator {
    /// Maps node id -> index into `nodes`
    node_ids: FxHashMap<String, usize>,
    nodes: Vec<GraphNode>,
    /// Maps edge id -> index into `edges`
    edge_ids: FxHashMap<String, usize>,
    edges: Vec<GraphEdge>,
}

impl GraphAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or strengthen the concept node for `term`, returning its id.
    ///
    /// A new node starts at frequency 1; each later call adds one and
    /// recomputes the capped size.
    pub fn upsert_concept<V: VisualSource + ?Sized>(
        &mut self,
        term: &str,
        document: &str,
        config: &GraphConfig,
        visuals: &mut V,
    ) -> String {
        let id = concept_id(term);

        if let Some(&idx) = self.node_ids.get(&id) {
            let node = &mut self.nodes[idx];
            node.frequency += 1;
            node.size = config.concept_size(node.frequency);
            return id;
        }

        self.insert_node(GraphNode {
            id: id.clone(),
            label: capitalize(term),
            node_type: NodeType::Concept,
            size: config.concept_size(1),
            color: visuals.concept_color(),
            frequency: 1,
            document: Some(document.to_string()),
        });
        id
    }

    /// Add the node for the document at `index`, returning its id
    pub fn add_document(&mut self, index: usize, name: &str, config: &GraphConfig) -> String {
        let id = document_id(index);
        self.insert_node(GraphNode {
            id: id.clone(),
            label: name.to_string(),
            node_type: NodeType::Document,
            size: config.document_node_size,
            color: DOCUMENT_COLOR.to_string(),
            frequency: 1,
            document: Some(name.to_string()),
        });
        id
    }

    fn insert_node(&mut self, node: GraphNode) {
        if self.node_ids.contains_key(&node.id) {
            return;
        }
        self.node_ids.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }

    /// Find the stored edge joining `a` and `b`, whichever way it was created
    fn find_edge(&self, a: &str, b: &str) -> Option<usize> {
        self.edge_ids
            .get(&edge_id(a, b))
            .or_else(|| self.edge_ids.get(&edge_id(b, a)))
            .copied()
    }

    /// Record a co-occurrence of `a` and `b`.
    ///
    /// The first occurrence creates the edge with a base weight drawn from
    /// `visuals`; repeats add `edge_weight_increment`. Requests for (a, b)
    /// and (b, a) resolve to the same edge.
    pub fn increment_edge<V: VisualSource + ?Sized>(
        &mut self,
        a: &str,
        b: &str,
        config: &GraphConfig,
        visuals: &mut V,
    ) {
        if a == b {
            return; // No self-loops
        }

        if let Some(idx) = self.find_edge(a, b) {
            let edge = &mut self.edges[idx];
            edge.weight += config.edge_weight_increment;
            edge.label = weight_label(edge.weight);
            trace!(edge = %edge.id, weight = edge.weight, "strengthened edge");
            return;
        }

        let weight = visuals.base_edge_weight(config.edge_weight_min, config.edge_weight_max);
        self.insert_edge(GraphEdge {
            id: edge_id(a, b),
            source: a.to_string(),
            target: b.to_string(),
            weight,
            label: weight_label(weight),
            edge_type: EdgeType::CoOccurrence,
        });
    }

    /// Link a document node to one of its concepts
    pub fn link_membership(&mut self, document: &str, concept: &str, config: &GraphConfig) {
        if self.find_edge(document, concept).is_some() {
            return;
        }

        self.insert_edge(GraphEdge {
            id: edge_id(document, concept),
            source: document.to_string(),
            target: concept.to_string(),
            weight: config.membership_weight,
            label: MEMBERSHIP_LABEL.to_string(),
            edge_type: EdgeType::Semantic,
        });
    }

    fn insert_edge(&mut self, edge: GraphEdge) {
        self.edge_ids.insert(edge.id.clone(), self.edges.len());
        self.edges.push(edge);
    }

    /// Get a node by id
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_ids.get(id).map(|&idx| &self.nodes[idx])
    }

    /// Get the edge joining `a` and `b` in either direction
    pub fn get_edge(&self, a: &str, b: &str) -> Option<&GraphEdge> {
        self.find_edge(a, b).map(|idx| &self.edges[idx])
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges (each undirected edge once)
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Flatten into the output sequences, in insertion order
    pub fn into_graph_data(self) -> GraphData {
        GraphData {
            nodes: self.nodes,
            edges: self.edges,
        }
    }
}

/// Builds a concept graph from a set of documents
#[derive(Debug, Clone)]
pub struct ConceptGraphBuilder {
    config: GraphConfig,
    tokenizer: Tokenizer,
}

impl Default for ConceptGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConceptGraphBuilder {
    /// Create a new builder with default config
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create with custom config
    pub fn with_config(config: GraphConfig) -> Self {
        let tokenizer = Tokenizer::concepts().with_min_length(config.min_term_length);
        Self { config, tokenizer }
    }

    /// The active configuration
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The concepts of one text: its most frequent terms, highest first
    pub fn extract_concepts(&self, content: &str) -> Vec<String> {
        self.tokenizer
            .term_vector(content)
            .top_terms(self.config.concepts_per_document)
            .into_iter()
            .map(|(term, _)| term.to_string())
            .collect()
    }

    /// Build a graph with randomized visual attributes
    pub fn build(&self, documents: &[Document]) -> GraphData {
        self.build_with(documents, &mut RandomVisuals::new())
    }

    /// Build a graph drawing visual attributes from `visuals`
    pub fn build_with<V: VisualSource + ?Sized>(
        &self,
        documents: &[Document],
        visuals: &mut V,
    ) -> GraphData {
        let mut graph = GraphAccumulator::new();

        for (index, document) in documents.iter().enumerate() {
            self.add_document(&mut graph, index, document, visuals);
        }

        debug!(
            documents = documents.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built concept graph"
        );

        graph.into_graph_data()
    }

    fn add_document<V: VisualSource + ?Sized>(
        &self,
        graph: &mut GraphAccumulator,
        index: usize,
        document: &Document,
        visuals: &mut V,
    ) {
        let concepts = self.extract_concepts(&document.content);
        trace!(document = %document.name, concepts = concepts.len(), "extracted concepts");

        let mut concept_ids = Vec::with_capacity(concepts.len());
        for term in &concepts {
            concept_ids.push(graph.upsert_concept(term, &document.name, &self.config, visuals));
        }

        for i in 0..concept_ids.len() {
            for j in (i + 1)..concept_ids.len() {
                graph.increment_edge(&concept_ids[i], &concept_ids[j], &self.config, visuals);
            }
        }

        let doc_id = graph.add_document(index, &document.name, &self.config);

        for concept in concept_ids
            .iter()
            .take(self.config.linked_concepts_per_document)
        {
            graph.link_membership(&doc_id, concept, &self.config);
        }
    }
}

/// Build a graph with the default configuration
pub fn build_concept_graph(documents: &[Document]) -> GraphData {
    ConceptGraphBuilder::new().build(documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::visuals::FixedVisuals;

    fn build(docs: &[(&str, &str)]) -> GraphData {
        let documents: Vec<Document> = docs.iter().map(|(n, c)| Document::new(*n, *c)).collect();
        ConceptGraphBuilder::new().build_with(&documents, &mut FixedVisuals::new())
    }

    #[test]
    fn test_accumulator_basic() {
        let cfg = GraphConfig::default();
        let mut visuals = FixedVisuals::new();
        let mut graph = GraphAccumulator::new();

        let id_a = graph.upsert_concept("machine", "D1", &cfg, &mut visuals);
        let id_b = graph.upsert_concept("learning", "D1", &cfg, &mut visuals);
        let id_c = graph.upsert_concept("machine", "D2", &cfg, &mut visuals); // duplicate

        assert_eq!(id_a, id_c); // Same term should get same ID
        assert_ne!(id_a, id_b);
        assert_eq!(graph.node_count(), 2);

        let machine = graph.get_node("concept-machine").unwrap();
        assert_eq!(machine.frequency, 2);
        assert_eq!(machine.size, 36.0);
        assert_eq!(machine.label, "Machine");
        assert_eq!(machine.document.as_deref(), Some("D1"));
    }

    #[test]
    fn test_edge_incrementing() {
        let cfg = GraphConfig::default();
        let mut visuals = FixedVisuals::new();
        let mut graph = GraphAccumulator::new();

        graph.increment_edge("concept-a", "concept-b", &cfg, &mut visuals);
        graph.increment_edge("concept-b", "concept-a", &cfg, &mut visuals);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.get_edge("concept-a", "concept-b").unwrap();
        assert!((edge.weight - 0.6).abs() < 1e-10);
        assert_eq!(edge.label, "0.6");
        assert_eq!(edge.source, "concept-a");
    }

    #[test]
    fn test_self_loops_prevented() {
        let cfg = GraphConfig::default();
        let mut graph = GraphAccumulator::new();

        graph.increment_edge("concept-a", "concept-a", &cfg, &mut FixedVisuals::new());

        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_membership_edge() {
        let cfg = GraphConfig::default();
        let mut graph = GraphAccumulator::new();

        graph.link_membership("doc-0", "concept-alpha", &cfg);
        graph.link_membership("doc-0", "concept-alpha", &cfg);

        assert_eq!(graph.edge_count(), 1);
        let edge = graph.get_edge("concept-alpha", "doc-0").unwrap();
        assert_eq!(edge.label, MEMBERSHIP_LABEL);
        assert_eq!(edge.edge_type, EdgeType::Semantic);
        assert_eq!(edge.weight, cfg.membership_weight);
    }

    #[test]
    fn test_three_concepts_three_edges() {
        let graph = build(&[("D1", "alpha beta gamma")]);

        let stats = graph.stats();
        assert_eq!(stats.concept_nodes, 3);
        assert_eq!(stats.cooccurrence_edges, 3);
        for (a, b) in [("alpha", "beta"), ("alpha", "gamma"), ("beta", "gamma")] {
            assert_eq!(
                graph
                    .edges_between(&concept_id(a), &concept_id(b))
                    .count(),
                1
            );
        }
    }

    #[test]
    fn test_repeated_pair_across_documents_merges() {
        let graph = build(&[("D1", "alpha beta"), ("D2", "beta alpha")]);

        let edges: Vec<&GraphEdge> = graph
            .edges_between("concept-alpha", "concept-beta")
            .collect();
        assert_eq!(edges.len(), 1);
        assert!((edges[0].weight - 0.6).abs() < 1e-10);
    }

    #[test]
    fn test_concepts_capped_per_document() {
        let content: String = (0..30)
            .map(|i| format!("term{:02} ", i))
            .collect();
        let graph = build(&[("D1", &content)]);

        assert_eq!(graph.stats().concept_nodes, 20);
        assert_eq!(graph.stats().cooccurrence_edges, 20 * 19 / 2);
        // Ties keep first-seen order
        assert!(graph.node("concept-term00").is_some());
        assert!(graph.node("concept-term19").is_some());
        assert!(graph.node("concept-term20").is_none());
    }

    #[test]
    fn test_document_nodes_and_membership() {
        let graph = build(&[("D1", "alpha beta alpha gamma delta delta delta")]);

        let doc = graph.node("doc-0").unwrap();
        assert_eq!(doc.node_type, NodeType::Document);
        assert_eq!(doc.label, "D1");
        assert_eq!(doc.frequency, 1);

        let linked: Vec<&str> = graph
            .edges
            .iter()
            .filter(|e| e.edge_type == EdgeType::Semantic)
            .map(|e| e.target.as_str())
            .collect();
        assert_eq!(linked, vec!["concept-delta", "concept-alpha", "concept-beta"]);
    }

    #[test]
    fn test_nan_weight_range_builds_without_panic() {
        let config = GraphConfig::default().with_edge_weight_range(f64::NAN, 1.0);
        let documents = vec![Document::new("D1", "alpha beta gamma")];

        let graph = ConceptGraphBuilder::with_config(config).build(&documents);

        assert_eq!(graph.stats().cooccurrence_edges, 3);
        assert!(graph.edges.iter().all(|e| e.weight.is_finite()));
    }

    #[test]
    fn test_empty_documents() {
        assert!(build(&[]).is_empty());

        let graph = build(&[("Empty", "")]);
        assert_eq!(graph.nodes.len(), 1);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("machine"), "Machine");
        assert_eq!(capitalize("émigré"), "Émigré");
        assert_eq!(capitalize(""), "");
    }
}
