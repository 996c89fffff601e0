use crate::corpus::Corpus;
use crate::document::Document;
use crate::error::{BayesError, BayesResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

/// A query document together with the label predicted for it.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub document: Document,
    pub predicted: String,
    pub score: f64,
}

impl PredictionResult {
    pub fn is_correct(&self) -> bool {
        self.document.label() == self.predicted
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    pub results: Vec<PredictionResult>,
    pub correct: usize,
}

impl Evaluation {
    pub fn total(&self) -> usize {
        self.results.len()
    }
}

/// Scores query documents against every label of a trained corpus.
///
/// Holds the corpus mutably because words first seen at query time get their
/// log-likelihoods resolved and cached on the corpus.
pub struct Predictor<'a> {
    corpus: &'a mut Corpus,
}

impl<'a> Predictor<'a> {
    pub fn new(corpus: &'a mut Corpus) -> Self {
        Predictor { corpus }
    }

    pub fn corpus(&self) -> &Corpus {
        &*self.corpus
    }

    /// Log-prior of `label` plus the log-likelihood of each unique token of `doc`.
    pub fn score_label(&mut self, doc: &Document, label: &str) -> BayesResult<f64> {
        let class = self
            .corpus
            .class(label)
            .ok_or_else(|| BayesError::UnknownLabel {
                label: label.to_string(),
            })?;

        let mut score = class.log_prior();
        for word in doc.tokens() {
            score += self.corpus.log_likelihood(word, label)?;
        }
        Ok(score)
    }

    /// Picks the highest scoring label. Labels are tried in ascending order and
    /// only a strictly greater score replaces the best so far, so ties go to
    /// the smallest label.
    pub fn classify(&mut self, doc: &Document) -> BayesResult<Prediction> {
        let labels: Vec<String> = self.corpus.labels().map(str::to_string).collect();

        let mut best: Option<Prediction> = None;
        for label in labels {
            let score = self.score_label(doc, &label)?;
            tracing::trace!(label = %label, score, "scored label");

            if best.as_ref().map_or(true, |best| score > best.score) {
                best = Some(Prediction { label, score });
            }
        }

        best.ok_or(BayesError::EmptyCorpus)
    }

    /// Classifies each document on its own. The documents never join the
    /// training corpus.
    pub fn evaluate<I>(&mut self, documents: I) -> BayesResult<Evaluation>
    where
        I: IntoIterator<Item = Document>,
    {
        if self.corpus.is_empty() {
            return Err(BayesError::EmptyCorpus);
        }

        let mut evaluation = Evaluation::default();
        for document in documents {
            let Prediction { label, score } = self.classify(&document)?;
            let result = PredictionResult {
                document,
                predicted: label,
                score,
            };
            if result.is_correct() {
                evaluation.correct += 1;
            }
            evaluation.results.push(result);
        }

        tracing::info!(
            correct = evaluation.correct,
            total = evaluation.total(),
            "evaluated query documents"
        );
        Ok(evaluation)
    }
}
