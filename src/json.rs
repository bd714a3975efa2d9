//! JSON interface for ranking and graph requests
//!
//! Payloads from the surrounding web layer are loosely typed. This module is
//! the only place where they are inspected: text fields that are missing or
//! null read as empty, numeric ids and page numbers are coerced, and any
//! other value where text is required is rejected with a
//! [`LexiRankError::TypeMismatch`] before the algorithms run.

use crate::context::{format_related_sections, DEFAULT_PREVIEW_CHARS};
use crate::errors::{LexiRankError, Result};
use crate::graph::builder::ConceptGraphBuilder;
use crate::graph::visuals::{RandomVisuals, VisualSource};
use crate::ranker::RelevanceRanker;
use crate::types::{Document, GraphConfig, GraphData, GraphStats, RankConfig, Section, SimilarityResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parsed ranking request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankRequest {
    pub query: String,
    pub sections: Vec<Section>,
    pub config: RankConfig,
    /// Attach a prompt-ready context block to the response
    pub include_context: bool,
}

/// A parsed batch ranking request: many queries, one section set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankBatchRequest {
    pub queries: Vec<String>,
    pub sections: Vec<Section>,
    pub config: RankConfig,
}

/// A parsed graph request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphRequest {
    pub documents: Vec<Document>,
    pub config: GraphConfig,
}

/// Output of a ranking request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub results: Vec<SimilarityResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

/// Output of a graph request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphResponse {
    #[serde(flatten)]
    pub graph: GraphData,
    pub stats: GraphStats,
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn as_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| LexiRankError::type_mismatch(path, "object", kind(value)))
}

fn as_array<'a>(value: Option<&'a Value>, path: &str) -> Result<&'a [Value]> {
    match value {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(LexiRankError::type_mismatch(path, "array", kind(other))),
    }
}

/// Text field; missing or null reads as empty
fn text(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(LexiRankError::type_mismatch(
            format!("{}.{}", path, key),
            "string",
            kind(other),
        )),
    }
}

/// Identifier field; numbers are rendered as text
fn identifier(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String> {
    match obj.get(key) {
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => text(obj, key, path),
    }
}

fn page_number(obj: &Map<String, Value>, path: &str) -> Result<u32> {
    let field = || format!("{}.pageNumber", path);
    match obj.get("pageNumber") {
        None | Some(Value::Null) => Ok(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| LexiRankError::type_mismatch(field(), "page number", n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|_| LexiRankError::type_mismatch(field(), "page number", format!("{:?}", s))),
        Some(other) => Err(LexiRankError::type_mismatch(field(), "number", kind(other))),
    }
}

fn request_config<T>(obj: &Map<String, Value>) -> Result<T>
where
    T: Default + for<'de> Deserialize<'de>,
{
    match obj.get("config") {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => Ok(serde_json::from_value(value.clone())?),
    }
}

/// Parse one section object
pub fn parse_section(value: &Value, path: &str) -> Result<Section> {
    let obj = as_object(value, path)?;
    Ok(Section {
        id: identifier(obj, "id", path)?,
        title: text(obj, "title", path)?,
        content: text(obj, "content", path)?,
        page_number: page_number(obj, path)?,
        document_name: text(obj, "documentName", path)?,
        document_id: identifier(obj, "documentId", path)?,
    })
}

/// Parse one document object
pub fn parse_document(value: &Value, path: &str) -> Result<Document> {
    let obj = as_object(value, path)?;
    let id = identifier(obj, "id", path)?;
    Ok(Document {
        id: if id.is_empty() { None } else { Some(id) },
        name: text(obj, "name", path)?,
        content: text(obj, "content", path)?,
    })
}

fn parse_sections(obj: &Map<String, Value>) -> Result<Vec<Section>> {
    as_array(obj.get("sections"), "sections")?
        .iter()
        .enumerate()
        .map(|(i, v)| parse_section(v, &format!("sections[{}]", i)))
        .collect()
}

impl RankRequest {
    /// Parse from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = as_object(value, "request")?;
        let config: RankConfig = request_config(obj)?;
        config.validate()?;

        let include_context = match obj.get("includeContext") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => {
                return Err(LexiRankError::type_mismatch(
                    "includeContext",
                    "boolean",
                    kind(other),
                ))
            }
        };

        Ok(Self {
            query: text(obj, "query", "request")?,
            sections: parse_sections(obj)?,
            config,
            include_context,
        })
    }

    /// Run the ranking
    pub fn run(&self) -> RankResponse {
        let results = RelevanceRanker::with_config(self.config.clone()).rank(&self.query, &self.sections);
        let context = self
            .include_context
            .then(|| format_related_sections(&results, DEFAULT_PREVIEW_CHARS));
        RankResponse { results, context }
    }
}

impl RankBatchRequest {
    /// Parse from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = as_object(value, "request")?;
        let config: RankConfig = request_config(obj)?;
        config.validate()?;

        let queries = as_array(obj.get("queries"), "queries")?
            .iter()
            .enumerate()
            .map(|(i, q)| match q {
                Value::Null => Ok(String::new()),
                Value::String(s) => Ok(s.clone()),
                other => Err(LexiRankError::type_mismatch(
                    format!("queries[{}]", i),
                    "string",
                    kind(other),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            queries,
            sections: parse_sections(obj)?,
            config,
        })
    }

    /// Run every query against the sections
    pub fn run(&self) -> Vec<RankResponse> {
        RelevanceRanker::with_config(self.config.clone())
            .rank_batch(self.queries.as_slice(), &self.sections)
            .into_iter()
            .map(|results| RankResponse {
                results,
                context: None,
            })
            .collect()
    }
}

impl GraphRequest {
    /// Parse from a JSON value
    pub fn from_value(value: &Value) -> Result<Self> {
        let obj = as_object(value, "request")?;
        let config: GraphConfig = request_config(obj)?;
        config.validate()?;

        let documents = as_array(obj.get("documents"), "documents")?
            .iter()
            .enumerate()
            .map(|(i, v)| parse_document(v, &format!("documents[{}]", i)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { documents, config })
    }

    /// Build the graph
    pub fn run(&self) -> GraphResponse {
        self.run_with(&mut RandomVisuals::new())
    }

    /// Build the graph drawing visual attributes from `visuals`
    pub fn run_with<V: VisualSource + ?Sized>(&self, visuals: &mut V) -> GraphResponse {
        let graph = ConceptGraphBuilder::with_config(self.config.clone())
            .build_with(&self.documents, visuals);
        let stats = graph.stats();
        GraphResponse { graph, stats }
    }
}

/// Rank sections from a JSON request
///
/// ```json
/// {"query": "...", "sections": [{"id": "s1", "title": "...", "content": "...",
///   "pageNumber": 1, "documentName": "...", "documentId": "..."}],
///  "config": {"top_n": 5}, "includeContext": true}
/// ```
///
/// Returns the JSON-encoded [`RankResponse`].
pub fn rank_from_json(json_input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json_input)?;
    let response = RankRequest::from_value(&value)?.run();
    Ok(serde_json::to_string(&response)?)
}

/// Rank one section set against several queries from a JSON request
///
/// Returns a JSON array with one [`RankResponse`] per query.
pub fn rank_batch_from_json(json_input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json_input)?;
    let responses = RankBatchRequest::from_value(&value)?.run();
    Ok(serde_json::to_string(&responses)?)
}

/// Build a concept graph from a JSON request
///
/// ```json
/// {"documents": [{"name": "D1", "content": "..."}], "config": {}}
/// ```
///
/// Returns the JSON-encoded [`GraphResponse`].
pub fn graph_from_json(json_input: &str) -> Result<String> {
    let value: Value = serde_json::from_str(json_input)?;
    let response = GraphRequest::from_value(&value)?.run();
    Ok(serde_json::to_string(&response)?)
}
