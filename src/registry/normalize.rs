//! Canonicalization of per-language database payloads.
//!
//! Database files come in three shapes. A payload is first classified into
//! [`RawPayload`] and the shape decides the interpretation, in this order:
//!
//! 1. a mapping with a `documents` key: the value under that key is the
//!    identifier to record mapping;
//! 2. a sequence of records: identifiers come from `doc_id`, or are
//!    synthesized as `doc_<index>` from the zero-based position;
//! 3. any other mapping: already an identifier to record mapping.
//!
//! Everything else is rejected with [`RegistryError::UnrecognizedSchema`].

use std::fmt;

use serde_json::{Map, Value};

use crate::error::RegistryError;
use crate::model::DocumentCollection;

pub const DOCUMENTS_KEY: &str = "documents";
pub const DOC_ID_FIELD: &str = "doc_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Null,
    Bool,
    Number,
    String,
    Sequence,
    Mapping,
}

impl PayloadShape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Sequence,
            Value::Object(_) => Self::Mapping,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for PayloadShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed database payload, classified by top-level shape.
#[derive(Debug, Clone, Copy)]
pub enum RawPayload<'a> {
    /// `{"documents": ...}`; holds the value under `documents`.
    MappingWithDocuments(&'a Value),
    Sequence(&'a [Value]),
    DirectMapping(&'a Map<String, Value>),
    Other(PayloadShape),
}

impl<'a> RawPayload<'a> {
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Object(map) => match map.get(DOCUMENTS_KEY) {
                Some(documents) => Self::MappingWithDocuments(documents),
                None => Self::DirectMapping(map),
            },
            Value::Array(items) => Self::Sequence(items),
            other => Self::Other(PayloadShape::of(other)),
        }
    }
}

pub fn normalize(payload: &Value) -> Result<DocumentCollection, RegistryError> {
    match RawPayload::classify(payload) {
        RawPayload::MappingWithDocuments(documents) => match documents {
            Value::Object(map) => Ok(collect_mapping(map)),
            other => Err(unrecognized(format!(
                "mapping whose '{DOCUMENTS_KEY}' value is a {}",
                PayloadShape::of(other)
            ))),
        },
        RawPayload::Sequence(items) => {
            let mut collection = DocumentCollection::new();
            for (index, item) in items.iter().enumerate() {
                let id = sequence_item_id(index, item)?;
                collection.insert(id, item.clone());
            }
            Ok(collection)
        }
        RawPayload::DirectMapping(map) => Ok(collect_mapping(map)),
        RawPayload::Other(shape) => Err(unrecognized(shape.to_string())),
    }
}

/// Number of documents `normalize` would produce, without copying any record.
pub fn document_count(payload: &Value) -> Result<usize, RegistryError> {
    match RawPayload::classify(payload) {
        RawPayload::MappingWithDocuments(Value::Object(map)) => Ok(map.len()),
        RawPayload::Sequence(items) => {
            let mut ids = std::collections::BTreeSet::new();
            for (index, item) in items.iter().enumerate() {
                ids.insert(sequence_item_id(index, item)?);
            }
            Ok(ids.len())
        }
        RawPayload::DirectMapping(map) => Ok(map.len()),
        // Same diagnostics as a full normalization.
        RawPayload::MappingWithDocuments(_) | RawPayload::Other(_) => {
            normalize(payload).map(|collection| collection.len())
        }
    }
}

fn collect_mapping(map: &Map<String, Value>) -> DocumentCollection {
    map.iter()
        .map(|(id, record)| (id.clone(), record.clone()))
        .collect()
}

fn sequence_item_id(index: usize, item: &Value) -> Result<String, RegistryError> {
    let Value::Object(record) = item else {
        return Err(unrecognized(format!(
            "sequence element {index} is a {}",
            PayloadShape::of(item)
        )));
    };

    let id = match record.get(DOC_ID_FIELD) {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        Some(Value::Bool(id)) => id.to_string(),
        Some(Value::Null) | None => format!("doc_{index}"),
        Some(other) => {
            return Err(unrecognized(format!(
                "sequence element {index} has a {} '{DOC_ID_FIELD}'",
                PayloadShape::of(other)
            )));
        }
    };

    Ok(id)
}

fn unrecognized(shape: String) -> RegistryError {
    RegistryError::UnrecognizedSchema { shape }
}
