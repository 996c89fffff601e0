//! Naive Bayes text classification over labeled documents.
//!
//! Training documents are grouped into one [`ClassModel`] per label inside a
//! [`Corpus`]. A [`Predictor`] scores a query document against every label as
//! the class log-prior plus the log-likelihood of each unique token, and
//! predicts the best scoring label.

pub mod class_model;
pub mod corpus;
pub mod document;
pub mod error;
pub mod input;
pub mod predictor;
pub mod report;

pub use class_model::ClassModel;
pub use corpus::{Corpus, Estimate, LikelihoodCase};
pub use document::Document;
pub use error::{BayesError, BayesResult};
pub use input::ReaderConfig;
pub use predictor::{Evaluation, Prediction, PredictionResult, Predictor};
