use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Crate error type.
///
/// Configuration errors (duplicates, empty sets, oversized dimensions) are
/// surfaced immediately and never retried. An unknown document id is a
/// contract violation by the caller and carries the offending id; an
/// out-of-vocabulary term is not an error at all and is silently dropped by
/// the builder.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("duplicate vocabulary term: {0:?}")]
    DuplicateTerm(String),
    #[error("duplicate document id: {0}")]
    DuplicateDocument(String),
    #[error("vocabulary is empty")]
    EmptyVocabulary,
    #[error("document set is empty")]
    EmptyDocuments,
    #[error("unknown document id: {0}")]
    UnknownDocument(String),
    #[error("projection dimension must be at least 1")]
    ZeroDimension,
    #[error("projection dimension {requested} exceeds term count {terms}")]
    DimensionTooLarge { requested: usize, terms: usize },
    #[error("projection has {columns} columns but {labels} labels were supplied")]
    LabelMismatch { columns: usize, labels: usize },
    #[error("scatter needs a 2-D projection, got {0} row(s)")]
    NotTwoDimensional(usize),
    #[error("snapshot codec error: {0}")]
    Snapshot(#[from] serde_cbor::Error),
    #[error("document source error: {0}")]
    Source(String),
}
