//! Parse store
//!
//! Holds the parser output for a set of documents and resolves
//! (document, sentence, word) coordinates to tagged tokens. Deserializes from
//! the CoNLL shared-task `parses.json` layout:
//!
//! ```text
//! {"wsj_1000": {"sentences": [{"words": [["Pierre", {"PartOfSpeech": "NNP", ...}], ...], ...}]}}
//! ```
//!
//! Fields other than `sentences`, `words` and `PartOfSpeech` are ignored.

use crate::{Error, Result, TaggedToken};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use tracing::debug;

/// Resolves token coordinates against parsed documents
pub trait TokenResolver: Send + Sync {
    fn resolve(&self, doc_id: &str, sentence: usize, word: usize) -> Result<TaggedToken>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParseStore {
    documents: AHashMap<String, ParsedDocument>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedDocument {
    #[serde(default)]
    pub sentences: Vec<ParsedSentence>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedSentence {
    #[serde(default)]
    pub words: Vec<ParsedWord>,
}

/// `[surface, {"PartOfSpeech": tag, ...}]`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedWord(pub String, pub WordAttributes);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WordAttributes {
    #[serde(rename = "PartOfSpeech", default)]
    pub part_of_speech: String,
}

impl ParsedWord {
    pub fn to_token(&self) -> TaggedToken {
        TaggedToken::new(self.0.clone(), self.1.part_of_speech.clone())
    }
}

impl ParseStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(json)?.loaded())
    }

    /// Read a whole `parses.json`; wrap files in a `BufReader`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader::<_, Self>(reader)?.loaded())
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value::<Self>(value)?.loaded())
    }

    fn loaded(self) -> Self {
        debug!(documents = self.documents.len(), "loaded parse store");
        self
    }

    /// Add a document given as sentences of already tagged tokens
    pub fn insert_document(&mut self, doc_id: impl Into<String>, sentences: Vec<Vec<TaggedToken>>) {
        let sentences = sentences
            .into_iter()
            .map(|tokens| ParsedSentence {
                words: tokens
                    .into_iter()
                    .map(|t| {
                        ParsedWord(
                            t.word,
                            WordAttributes {
                                part_of_speech: t.tag,
                            },
                        )
                    })
                    .collect(),
            })
            .collect();
        self.documents
            .insert(doc_id.into(), ParsedDocument { sentences });
    }

    pub fn document(&self, doc_id: &str) -> Option<&ParsedDocument> {
        self.documents.get(doc_id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl TokenResolver for ParseStore {
    fn resolve(&self, doc_id: &str, sentence: usize, word: usize) -> Result<TaggedToken> {
        let document = self
            .documents
            .get(doc_id)
            .ok_or_else(|| Error::UnknownDocument(doc_id.to_string()))?;

        document
            .sentences
            .get(sentence)
            .and_then(|s| s.words.get(word))
            .map(ParsedWord::to_token)
            .ok_or_else(|| Error::TokenOutOfRange {
                doc_id: doc_id.to_string(),
                sentence,
                word,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> ParseStore {
        ParseStore::from_value(json!({
            "doc1": {
                "sentences": [
                    {
                        "words": [
                            ["The", {"CharacterOffsetBegin": 0, "CharacterOffsetEnd": 3, "Linkers": [], "PartOfSpeech": "DT"}],
                            ["dog", {"PartOfSpeech": "NN"}]
                        ],
                        "parsetree": "( (S ...) )",
                        "dependencies": []
                    },
                    {"words": [["barked", {"PartOfSpeech": "VBD"}]]}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_resolve() {
        let s = store();
        assert_eq!(s.resolve("doc1", 0, 1).unwrap(), TaggedToken::new("dog", "NN"));
        assert_eq!(s.resolve("doc1", 1, 0).unwrap(), TaggedToken::new("barked", "VBD"));
    }

    #[test]
    fn test_resolve_unknown_document() {
        let err = store().resolve("doc2", 0, 0).unwrap_err();
        assert!(matches!(err, Error::UnknownDocument(ref d) if d == "doc2"));
        assert!(err.is_malformed_record());
    }

    #[test]
    fn test_resolve_out_of_range() {
        let s = store();
        assert!(matches!(
            s.resolve("doc1", 0, 2),
            Err(Error::TokenOutOfRange { sentence: 0, word: 2, .. })
        ));
        assert!(matches!(
            s.resolve("doc1", 5, 0),
            Err(Error::TokenOutOfRange { sentence: 5, .. })
        ));
    }

    #[test]
    fn test_missing_pos_defaults_to_empty_tag() {
        let s = ParseStore::from_json_str(r#"{"d": {"sentences": [{"words": [["x", {}]]}]}}"#).unwrap();
        assert_eq!(s.resolve("d", 0, 0).unwrap().tag, "");
    }

    #[test]
    fn test_invalid_json() {
        let err = ParseStore::from_json_str("{\"d\": 3}").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_insert_document() {
        let mut s = ParseStore::new();
        s.insert_document("d", vec![vec![TaggedToken::new("hi", "UH")]]);
        assert_eq!(s.len(), 1);
        assert_eq!(s.resolve("d", 0, 0).unwrap().word, "hi");
    }
}
