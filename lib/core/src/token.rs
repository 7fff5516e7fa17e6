use serde::{Deserialize, Serialize};

/// A word together with its part-of-speech tag, as produced by the parser
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    pub word: String,
    pub tag: String,
}

impl TaggedToken {
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    #[inline]
    pub fn word(&self) -> &str {
        &self.word
    }

    #[inline]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<W: Into<String>, T: Into<String>> From<(W, T)> for TaggedToken {
    fn from((word, tag): (W, T)) -> Self {
        TaggedToken::new(word, tag)
    }
}

/// Surface forms of a token sequence, in order
pub fn words_of(tokens: &[TaggedToken]) -> Vec<&str> {
    tokens.iter().map(|t| t.word.as_str()).collect()
}
