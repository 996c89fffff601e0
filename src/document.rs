use std::collections::BTreeSet;

/// One labeled unit of text and the set of unique tokens in it.
///
/// Tokens are whitespace-delimited and case-sensitive. They are computed once
/// on construction and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    label: String,
    text: String,
    tokens: BTreeSet<String>,
}

impl Document {
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let tokens = unique_tokens(&text);
        Document {
            label: label.into(),
            text,
            tokens,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &BTreeSet<String> {
        &self.tokens
    }

    pub fn has_token(&self, word: &str) -> bool {
        self.tokens.contains(word)
    }
}

/// Splits `text` on whitespace, collapsing duplicates.
pub fn unique_tokens(text: &str) -> BTreeSet<String> {
    text.split_whitespace().map(str::to_string).collect()
}
