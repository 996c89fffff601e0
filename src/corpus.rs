use std::collections::{btree_map::Entry, BTreeMap, BTreeSet};

use crate::class_model::ClassModel;
use crate::document::Document;
use crate::error::{BayesError, BayesResult};

/// Which of the three estimation rules produced a log-likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikelihoodCase {
    /// The word occurs in some of the class's own documents.
    InClass,
    /// The word occurs in the training data, just not in this class.
    CrossClass,
    /// The word occurs nowhere in the training data.
    Unseen,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub case: LikelihoodCase,
    pub log_likelihood: f64,
}

/// All training documents, grouped into one [`ClassModel`] per label.
///
/// Built in a single pass by [`Corpus::train`], which also warms every
/// (word, label) log-likelihood over the training vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    docs: Vec<Document>,
    classes: BTreeMap<String, ClassModel>,
    vocabulary: BTreeSet<String>,
}

impl Corpus {
    pub fn train<I>(documents: I) -> Self
    where
        I: IntoIterator<Item = Document>,
    {
        let docs: Vec<Document> = documents.into_iter().collect();

        // Group document ids by label and collect the vocabulary:
        let mut grouped = BTreeMap::new();
        let mut vocabulary = BTreeSet::new();
        for (id, doc) in docs.iter().enumerate() {
            vocabulary.extend(doc.tokens().iter().cloned());

            match grouped.entry(doc.label().to_string()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(Vec::new()),
            }
            .push(id);
        }

        // The corpus size is only known now, so class models are built last:
        let classes = grouped
            .into_iter()
            .map(|(label, ids): (String, Vec<usize>)| {
                let mut class = ClassModel::new(label.clone(), docs.len());
                for id in ids {
                    class.add_document(id, &docs[id]);
                }
                (label, class)
            })
            .collect();

        let mut corpus = Corpus {
            docs,
            classes,
            vocabulary,
        };
        corpus.precompute_likelihoods();

        tracing::info!(
            documents = corpus.len(),
            labels = corpus.classes.len(),
            vocabulary = corpus.vocabulary.len(),
            "trained corpus"
        );
        corpus
    }

    fn precompute_likelihoods(&mut self) {
        let mut in_class = 0usize;
        let mut fallback = 0usize;

        for word in &self.vocabulary {
            let estimate = self.corpus_estimate(word);
            for class in self.classes.values_mut() {
                if class.log_likelihood(&self.docs, word).is_some() {
                    in_class += 1;
                } else {
                    class.insert_log_likelihood(word, estimate.log_likelihood);
                    fallback += 1;
                }
            }
        }

        tracing::debug!(in_class, fallback, "precomputed log-likelihoods");
    }

    /// Number of training documents.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn documents(&self) -> &[Document] {
        &self.docs
    }

    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// Labels in ascending order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn class(&self, label: &str) -> Option<&ClassModel> {
        self.classes.get(label)
    }

    /// Class models in ascending label order.
    pub fn classes(&self) -> impl Iterator<Item = &ClassModel> {
        self.classes.values()
    }

    /// Number of training documents of any class that contain `word`.
    pub fn docs_containing(&self, word: &str) -> usize {
        self.classes
            .values()
            .map(|class| class.count_docs_containing(&self.docs, word))
            .sum()
    }

    /// Evaluates the estimation rules for (`word`, `label`) without touching
    /// any cache.
    pub fn estimate(&self, word: &str, label: &str) -> BayesResult<Estimate> {
        let class = self.class(label).ok_or_else(|| unknown_label(label))?;

        let count = class.count_docs_containing(&self.docs, word);
        if count > 0 {
            return Ok(Estimate {
                case: LikelihoodCase::InClass,
                log_likelihood: ln_ratio(count, class.len()),
            });
        }

        Ok(self.corpus_estimate(word))
    }

    /// Cached log-likelihood of `word` under `label`, resolved and cached on
    /// first use.
    pub fn log_likelihood(&mut self, word: &str, label: &str) -> BayesResult<f64> {
        let class = self
            .classes
            .get_mut(label)
            .ok_or_else(|| unknown_label(label))?;
        if let Some(likelihood) = class.log_likelihood(&self.docs, word) {
            return Ok(likelihood);
        }

        let estimate = self.corpus_estimate(word);
        tracing::trace!(
            word,
            label,
            case = ?estimate.case,
            "resolved log-likelihood on demand"
        );

        let class = self
            .classes
            .get_mut(label)
            .ok_or_else(|| unknown_label(label))?;
        Ok(class.insert_log_likelihood(word, estimate.log_likelihood))
    }

    // Rules for a word the class itself never saw; these do not depend on the label.
    fn corpus_estimate(&self, word: &str) -> Estimate {
        if self.vocabulary.contains(word) {
            Estimate {
                case: LikelihoodCase::CrossClass,
                log_likelihood: ln_ratio(self.docs_containing(word), self.len()),
            }
        } else {
            Estimate {
                case: LikelihoodCase::Unseen,
                log_likelihood: ln_ratio(1, self.len()),
            }
        }
    }
}

fn ln_ratio(numerator: usize, denominator: usize) -> f64 {
    (numerator as f64 / denominator as f64).ln()
}

fn unknown_label(label: &str) -> BayesError {
    BayesError::UnknownLabel {
        label: label.to_string(),
    }
}
