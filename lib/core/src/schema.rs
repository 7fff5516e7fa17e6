//! Record schema
//!
//! Names the fields of a relation record and where the sentence/word
//! coordinates sit inside each token-list entry. Defaults follow the CoNLL
//! shared-task `relations.json` layout:
//!
//! ```text
//! {"DocID": "wsj_1000",
//!  "Arg1": {"TokenList": [[charBegin, charEnd, docOffset, sentIdx, wordIdx], ...]},
//!  "Arg2": {...},
//!  "Connective": {"TokenList": []}}
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RecordSchema {
    pub doc_id_field: String,
    pub arg1_field: String,
    pub arg2_field: String,
    pub connective_field: String,
    pub token_list_field: String,
    /// Index of the sentence number inside a token-list entry
    pub sentence_index_position: usize,
    /// Index of the word-in-sentence number inside a token-list entry
    pub word_index_position: usize,
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self {
            doc_id_field: "DocID".to_string(),
            arg1_field: "Arg1".to_string(),
            arg2_field: "Arg2".to_string(),
            connective_field: "Connective".to_string(),
            token_list_field: "TokenList".to_string(),
            sentence_index_position: 3,
            word_index_position: 4,
        }
    }
}

impl RecordSchema {
    pub fn validate(&self) -> Result<()> {
        let names = [
            &self.doc_id_field,
            &self.arg1_field,
            &self.arg2_field,
            &self.connective_field,
            &self.token_list_field,
        ];
        if names.iter().any(|n| n.is_empty()) {
            return Err(Error::InvalidConfig("record field names cannot be empty".into()));
        }
        if self.sentence_index_position == self.word_index_position {
            return Err(Error::InvalidConfig(
                "sentence and word index positions must differ".into(),
            ));
        }
        Ok(())
    }

    /// Shortest token-list entry that still carries both coordinates
    pub fn min_entry_len(&self) -> usize {
        self.sentence_index_position.max(self.word_index_position) + 1
    }
}
