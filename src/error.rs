use std::path::PathBuf;
use thiserror::Error;

/// Failures of the delimited-text record source.
#[derive(Error, Debug)]
pub enum DataSourceError {
    #[error("could not open {}: {source}", path.display())]
    Open { path: PathBuf, source: csv::Error },

    /// `position` 0 is the header row.
    #[error("malformed input at record {position}: {source}")]
    Read { position: usize, source: csv::Error },

    #[error("record {position} is missing the `{field}` field")]
    MissingField { field: String, position: usize },
}

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    #[error("cannot train on an empty corpus")]
    EmptyCorpus,

    #[error("no labels have been trained")]
    NoLabels,

    #[error("label `{0}` was never seen during training")]
    UnknownLabel(String),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
