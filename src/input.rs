//! Reading labeled records from CSV files.

use std::{io, path::Path};

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::document::Document;
use crate::error::{BayesError, BayesResult};

/// Which header columns hold the label and the text of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    pub label_column: String,
    pub text_column: String,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            label_column: "tag".to_string(),
            text_column: "content".to_string(),
        }
    }
}

pub fn read_documents<P: AsRef<Path>>(
    path: P,
    config: &ReaderConfig,
) -> BayesResult<Vec<Document>> {
    let reader = ReaderBuilder::new().flexible(true).from_path(path)?;
    collect_documents(reader, config)
}

pub fn read_documents_from<R: io::Read>(
    rdr: R,
    config: &ReaderConfig,
) -> BayesResult<Vec<Document>> {
    let reader = ReaderBuilder::new().flexible(true).from_reader(rdr);
    collect_documents(reader, config)
}

fn collect_documents<R: io::Read>(
    mut reader: Reader<R>,
    config: &ReaderConfig,
) -> BayesResult<Vec<Document>> {
    let headers = reader.headers()?.clone();
    let label_index = column_index(&headers, &config.label_column)?;
    let text_index = column_index(&headers, &config.text_column)?;

    let mut documents = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let field = |index: usize, column: &str| {
            record.get(index).ok_or_else(|| BayesError::MalformedRecord {
                record: i + 1,
                column: column.to_string(),
            })
        };

        let label = field(label_index, &config.label_column)?;
        let text = field(text_index, &config.text_column)?;
        documents.push(Document::new(label, text));
    }

    tracing::debug!(documents = documents.len(), "read labeled records");
    Ok(documents)
}

fn column_index(headers: &StringRecord, column: &str) -> BayesResult<usize> {
    headers
        .iter()
        .position(|header| header.trim() == column)
        .ok_or_else(|| BayesError::MissingColumn {
            column: column.to_string(),
        })
}
