//! Raw token extraction
//!
//! Returns the words of each argument instead of vectors, for callers that
//! featurize text themselves.

use discsim_core::{RecordSchema, RelationRecord, Result, TaggedToken, TokenResolver};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Key carrying the connective flag in [`RawTokens::to_value`]
pub const HAS_CONNECTIVE_KEY: &str = "HasConnective";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTokens {
    pub has_connective: bool,
    pub arg1: Vec<String>,
    pub connective: Vec<String>,
    pub arg2: Vec<String>,
}

impl RawTokens {
    /// JSON object keyed by the schema's field names, with the flag as 1 or 0
    pub fn to_value(&self, schema: &RecordSchema) -> Value {
        let mut object = serde_json::Map::with_capacity(4);
        object.insert(HAS_CONNECTIVE_KEY.to_string(), json!(u8::from(self.has_connective)));
        object.insert(schema.arg1_field.clone(), json!(self.arg1));
        object.insert(schema.connective_field.clone(), json!(self.connective));
        object.insert(schema.arg2_field.clone(), json!(self.arg2));
        Value::Object(object)
    }
}

/// Resolve a record and keep only the words, in order
pub fn extract_raw<R>(record: &RelationRecord, resolver: &R) -> Result<RawTokens>
where
    R: TokenResolver + ?Sized,
{
    let resolved = record.resolve(resolver)?;
    let words = |tokens: Vec<TaggedToken>| -> Vec<String> { tokens.into_iter().map(|t| t.word).collect() };

    Ok(RawTokens {
        has_connective: !resolved.connective.is_empty(),
        arg1: words(resolved.arg1),
        connective: words(resolved.connective),
        arg2: words(resolved.arg2),
    })
}
