//! Text normalization: tokenization and stopword filtering

pub mod stopwords;
pub mod tokenizer;
