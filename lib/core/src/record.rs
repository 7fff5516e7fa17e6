//! Relation records
//!
//! A relation record names a document and lists, for Arg1, Arg2 and the
//! connective, the coordinates of their tokens in the parse store.

use crate::parse::TokenResolver;
use crate::schema::RecordSchema;
use crate::{Error, Result, TaggedToken};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentence/word coordinates of one token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenRef {
    pub sentence: usize,
    pub word: usize,
}

impl TokenRef {
    pub fn new(sentence: usize, word: usize) -> Self {
        Self { sentence, word }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRecord {
    pub doc_id: String,
    pub arg1: Vec<TokenRef>,
    pub arg2: Vec<TokenRef>,
    /// Empty for implicit relations
    #[serde(default)]
    pub connective: Vec<TokenRef>,
}

/// Arguments of a record with their coordinates resolved
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedRelation {
    pub arg1: Vec<TaggedToken>,
    pub arg2: Vec<TaggedToken>,
    pub connective: Vec<TaggedToken>,
}

impl RelationRecord {
    pub fn new(
        doc_id: impl Into<String>,
        arg1: Vec<TokenRef>,
        arg2: Vec<TokenRef>,
        connective: Vec<TokenRef>,
    ) -> Self {
        Self {
            doc_id: doc_id.into(),
            arg1,
            arg2,
            connective,
        }
    }

    pub fn has_connective(&self) -> bool {
        !self.connective.is_empty()
    }

    /// Read a record laid out as described by `schema`.
    ///
    /// A missing connective field is read as an empty connective; a missing
    /// document id or argument is a malformed record.
    pub fn from_value(value: &Value, schema: &RecordSchema) -> Result<Self> {
        let doc_id = match value.get(&schema.doc_id_field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::MalformedRecord(format!(
                    "field '{}' must be a string, got {}",
                    schema.doc_id_field, other
                )))
            }
            None => {
                return Err(Error::MalformedRecord(format!(
                    "missing field '{}'",
                    schema.doc_id_field
                )))
            }
        };

        let arg1 = read_span(value, &schema.arg1_field, schema, true)?;
        let arg2 = read_span(value, &schema.arg2_field, schema, true)?;
        let connective = read_span(value, &schema.connective_field, schema, false)?;

        Ok(Self {
            doc_id,
            arg1,
            arg2,
            connective,
        })
    }

    pub fn from_json_str(json: &str, schema: &RecordSchema) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value, schema)
    }

    /// Resolve every coordinate; fails on the first one that does not resolve
    pub fn resolve<R>(&self, resolver: &R) -> Result<ResolvedRelation>
    where
        R: TokenResolver + ?Sized,
    {
        Ok(ResolvedRelation {
            arg1: self.resolve_span(&self.arg1, resolver)?,
            arg2: self.resolve_span(&self.arg2, resolver)?,
            connective: self.resolve_span(&self.connective, resolver)?,
        })
    }

    fn resolve_span<R>(&self, refs: &[TokenRef], resolver: &R) -> Result<Vec<TaggedToken>>
    where
        R: TokenResolver + ?Sized,
    {
        refs.iter()
            .map(|r| resolver.resolve(&self.doc_id, r.sentence, r.word))
            .collect()
    }
}

fn read_span(
    record: &Value,
    field: &str,
    schema: &RecordSchema,
    required: bool,
) -> Result<Vec<TokenRef>> {
    let span = match record.get(field) {
        Some(span) => span,
        None if required => {
            return Err(Error::MalformedRecord(format!("missing field '{field}'")))
        }
        None => return Ok(Vec::new()),
    };

    let entries = match span.get(&schema.token_list_field) {
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(Error::MalformedRecord(format!(
                "'{field}.{}' must be an array",
                schema.token_list_field
            )))
        }
        None if required => {
            return Err(Error::MalformedRecord(format!(
                "missing field '{field}.{}'",
                schema.token_list_field
            )))
        }
        None => return Ok(Vec::new()),
    };

    entries
        .iter()
        .map(|entry| read_token_ref(entry, field, schema))
        .collect()
}

fn read_token_ref(entry: &Value, field: &str, schema: &RecordSchema) -> Result<TokenRef> {
    let coordinate = |position: usize| -> Result<usize> {
        entry
            .as_array()
            .filter(|items| items.len() >= schema.min_entry_len())
            .and_then(|items| items[position].as_u64())
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| {
                Error::MalformedRecord(format!(
                    "'{field}' token entry {entry} needs non-negative integers at positions {} and {}",
                    schema.sentence_index_position, schema.word_index_position
                ))
            })
    };

    Ok(TokenRef {
        sentence: coordinate(schema.sentence_index_position)?,
        word: coordinate(schema.word_index_position)?,
    })
}
