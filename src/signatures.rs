// src/signatures.rs
//! Signature catalog loading.
//!
//! The catalog is a JSON object mapping WAF display names to ordered lists
//! of signature strings. It is loaded once at startup and never mutated, so
//! it can be shared by reference across the matcher and the ranker.

use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default location of the shipped signature catalog.
pub const DEFAULT_CATALOG_PATH: &str = "docs/waf_signatures.json";

/// Errors that can occur while loading the signature catalog
#[derive(Error, Debug)]
pub enum CatalogLoadError {
    #[error("failed to read signature catalog '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("signature catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed signature catalog: {0}")]
    Shape(String),
}

/// Immutable mapping from WAF name to its known signatures.
///
/// Entries keep the order they appear in the source file. That order drives
/// both signature scanning and ranking tie-breaks, so it must be stable.
#[derive(Debug, Clone)]
pub struct SignatureCatalog {
    wafs: Vec<(String, Vec<String>)>,
}

impl SignatureCatalog {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let path_ref = path.as_ref();
        let text = fs::read_to_string(path_ref).map_err(|source| CatalogLoadError::Io {
            path: path_ref.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, CatalogLoadError> {
        let root: Value = serde_json::from_str(text)?;

        let map = match root {
            Value::Object(map) => map,
            other => {
                return Err(CatalogLoadError::Shape(format!(
                    "expected a top-level object, found {}",
                    json_type_name(&other)
                )))
            }
        };

        let mut wafs = Vec::with_capacity(map.len());
        for (name, value) in map {
            let entries = match value {
                Value::Array(items) => items,
                other => {
                    return Err(CatalogLoadError::Shape(format!(
                        "signatures for '{}' must be an array, found {}",
                        name,
                        json_type_name(&other)
                    )))
                }
            };

            let mut signatures = Vec::with_capacity(entries.len());
            for item in entries {
                match item {
                    Value::String(s) => signatures.push(s),
                    other => {
                        return Err(CatalogLoadError::Shape(format!(
                            "signature entry for '{}' must be a string, found {}",
                            name,
                            json_type_name(&other)
                        )))
                    }
                }
            }
            wafs.push((name, signatures));
        }

        Ok(SignatureCatalog { wafs })
    }

    /// Build a catalog directly from entries. Used by tests and embedding.
    pub fn from_entries(entries: Vec<(String, Vec<String>)>) -> Self {
        SignatureCatalog { wafs: entries }
    }

    /// Iterate (waf, signatures) pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.wafs.iter().map(|(name, sigs)| (name.as_str(), sigs.as_slice()))
    }

    /// WAF display names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.wafs.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.wafs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wafs.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
