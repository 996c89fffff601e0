//! Error types for training, prediction and record input.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BayesError {
    #[error("the corpus has no training documents, so there is no label to predict")]
    EmptyCorpus,

    #[error("label `{label}` does not occur in the training corpus")]
    UnknownLabel { label: String },

    #[error("input header has no `{column}` column")]
    MissingColumn { column: String },

    #[error("record {record} is missing its `{column}` field")]
    MalformedRecord { record: usize, column: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type BayesResult<T> = std::result::Result<T, BayesError>;
