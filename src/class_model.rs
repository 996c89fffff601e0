use std::collections::{BTreeSet, HashMap};

use crate::document::Document;

/// Per-label statistics over the training documents carrying that label.
///
/// Documents live in the owning [`Corpus`](crate::corpus::Corpus) and are
/// referenced here by index, so anything that looks at document contents takes
/// that arena as `docs`.
#[derive(Debug, Clone)]
pub struct ClassModel {
    label: String,
    doc_ids: Vec<usize>,
    words: BTreeSet<String>,
    corpus_size: usize,
    likelihoods: HashMap<String, f64>,
}

impl ClassModel {
    /// `corpus_size` is the number of training documents across all classes.
    pub fn new(label: impl Into<String>, corpus_size: usize) -> Self {
        assert!(corpus_size > 0, "class model needs a non-empty corpus");

        ClassModel {
            label: label.into(),
            doc_ids: Vec::new(),
            words: BTreeSet::new(),
            corpus_size,
            likelihoods: HashMap::new(),
        }
    }

    pub fn add_document(&mut self, id: usize, doc: &Document) {
        debug_assert!(self.doc_ids.len() < self.corpus_size);

        self.doc_ids.push(id);
        self.words.extend(doc.tokens().iter().cloned());
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doc_ids.is_empty()
    }

    pub fn corpus_size(&self) -> usize {
        self.corpus_size
    }

    /// Union of the tokens of every document in this class.
    pub fn words(&self) -> &BTreeSet<String> {
        &self.words
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn documents<'a>(&'a self, docs: &'a [Document]) -> impl Iterator<Item = &'a Document> {
        self.doc_ids.iter().map(move |&id| &docs[id])
    }

    pub fn log_prior(&self) -> f64 {
        (self.doc_ids.len() as f64 / self.corpus_size as f64).ln()
    }

    /// Number of this class's documents that contain `word`.
    pub fn count_docs_containing(&self, docs: &[Document], word: &str) -> usize {
        if !self.contains_word(word) {
            return 0;
        }

        self.documents(docs).fold(0, |acc, doc| {
            if doc.has_token(word) {
                acc + 1
            } else {
                acc
            }
        })
    }

    /// Returns the cached log-likelihood of `word`, computing it first if the
    /// word occurs in this class.
    ///
    /// `None` means the word never occurs here; only the corpus can resolve it.
    pub fn log_likelihood(&mut self, docs: &[Document], word: &str) -> Option<f64> {
        if let Some(&likelihood) = self.likelihoods.get(word) {
            return Some(likelihood);
        }

        let count = self.count_docs_containing(docs, word);
        if count == 0 {
            return None;
        }

        let likelihood = (count as f64 / self.doc_ids.len() as f64).ln();
        Some(self.insert_log_likelihood(word, likelihood))
    }

    /// Read-only view of the cache.
    pub fn cached_log_likelihood(&self, word: &str) -> Option<f64> {
        self.likelihoods.get(word).copied()
    }

    pub fn has_likelihood(&self, word: &str) -> bool {
        self.likelihoods.contains_key(word)
    }

    // First write wins, so a repeated insert for the same word is a no-op.
    pub(crate) fn insert_log_likelihood(&mut self, word: &str, likelihood: f64) -> f64 {
        *self
            .likelihoods
            .entry(word.to_string())
            .or_insert(likelihood)
    }
}
