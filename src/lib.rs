//! # lexirank
//!
//! Lexical relevance ranking and concept-graph construction for document
//! study tools.
//!
//! Two pipelines share one tokenizer and stopword table:
//!
//! - **Relevance ranking**: score sections against a query by cosine
//!   similarity of term-frequency vectors and explain each match by the
//!   terms they share.
//! - **Concept graphs**: pick each document's most frequent terms as
//!   concepts, link concepts that co-occur and link each document to its
//!   leading concepts, ready for a force-directed visualization.
//!
//! Both are pure, request-scoped computations; no state survives a call.

pub mod context;
pub mod errors;
pub mod graph;
pub mod json;
pub mod nlp;
pub mod ranker;
pub mod types;
pub mod vector;

// Re-export commonly used types
pub use errors::{LexiRankError, Result};
pub use types::{
    Document, EdgeType, GraphConfig, GraphData, GraphEdge, GraphNode, GraphStats, LexiConfig,
    NodeType, RankConfig, Section, SimilarityResult,
};

// Re-export main functionality
pub use graph::builder::{build_concept_graph, ConceptGraphBuilder, GraphAccumulator};
pub use graph::visuals::{FixedVisuals, RandomVisuals, VisualSource};
pub use nlp::{stopwords::StopwordFilter, tokenizer::Tokenizer};
pub use ranker::{rank_sections, RelevanceRanker};
pub use vector::{cosine_similarity, TermVector};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
