pub mod pca;
pub mod session;
pub mod source;
pub mod weighting;

use std::borrow::Cow;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexSet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};
use self::weighting::{weight_matrix, GlobalWeight, LocalWeight};

/// Term-document matrix builder.
///
/// Accumulates raw term-frequency counts per (term, document) pair over a
/// fixed vocabulary and a fixed document set, then derives a weighted matrix
/// under a chosen local/global weighting scheme.
///
/// `TdmBuilder<K>` is generic over the document key type `K` (e.g. `u64`,
/// `String`). The vocabulary and the document ids are indexed once at
/// construction; term rows and document columns are found in O(1) afterward.
///
/// Counting is deliberately asymmetric: a term outside the vocabulary is the
/// expected common case for free text and is silently dropped, while a
/// document id outside the known set is a caller contract violation and is
/// reported as an error.
///
/// # Serialization
/// Supported; the full count state round-trips, so built matrices can be
/// cached across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TdmBuilder<K = u64>
where
    K: Eq + Hash + Clone + Debug,
{
    /// vocabulary; position is the row index
    terms: IndexSet<String>,
    /// document ids; position is the column index
    documents: IndexSet<K>,
    /// raw term-frequency counts, terms x documents
    tf: Array2<f64>,
}

impl<K> TdmBuilder<K>
where
    K: Eq + Hash + Clone + Debug,
{
    /// Create a builder over a vocabulary and a document-id sequence.
    ///
    /// Both sequences must be non-empty and duplicate-free; duplicates are
    /// rejected here rather than silently collapsed, since they would
    /// corrupt the positional row/column mapping.
    pub fn new<T, D>(terms: T, documents: D) -> Result<Self>
    where
        T: IntoIterator,
        T::Item: Into<String>,
        D: IntoIterator<Item = K>,
    {
        let mut term_index = IndexSet::new();
        for term in terms {
            let term: String = term.into();
            if !term_index.insert(term.clone()) {
                return Err(AnalyzerError::DuplicateTerm(term));
            }
        }
        let mut document_index = IndexSet::new();
        for id in documents {
            if !document_index.insert(id.clone()) {
                return Err(AnalyzerError::DuplicateDocument(format!("{id:?}")));
            }
        }
        if term_index.is_empty() {
            return Err(AnalyzerError::EmptyVocabulary);
        }
        if document_index.is_empty() {
            return Err(AnalyzerError::EmptyDocuments);
        }

        let tf = Array2::zeros((term_index.len(), document_index.len()));
        Ok(Self {
            terms: term_index,
            documents: document_index,
            tf,
        })
    }

    /// Count one term occurrence for a document.
    ///
    /// Out-of-vocabulary terms are silently ignored; an unknown document id
    /// is an error.
    pub fn add_term(&mut self, document: &K, term: &str) -> Result<()> {
        let col = self.document_column(document)?;
        if let Some(row) = self.terms.get_index_of(term) {
            self.tf[[row, col]] += 1.0;
        }
        Ok(())
    }

    /// Count every term in the slice for a document. Equivalent to repeated
    /// [`add_term`](Self::add_term) calls, but resolves the document column
    /// once; the order of terms does not affect the result.
    pub fn add_terms<T>(&mut self, document: &K, terms: &[T]) -> Result<()>
    where
        T: AsRef<str>,
    {
        let col = self.document_column(document)?;
        for term in terms {
            if let Some(row) = self.terms.get_index_of(term.as_ref()) {
                self.tf[[row, col]] += 1.0;
            }
        }
        Ok(())
    }

    /// Read-only view of the raw term-frequency counts.
    #[inline]
    pub fn term_frequency_matrix(&self) -> &Array2<f64> {
        &self.tf
    }

    /// Derive the weighted matrix for the current counts. See
    /// [`weight_matrix`] for the fast paths and the two-pass general case;
    /// the returned matrix must be treated as read-only.
    pub fn build_matrix(&self, local: LocalWeight, global: GlobalWeight) -> Cow<'_, Array2<f64>> {
        weight_matrix(&self.tf, local, global)
    }

    /// Number of vocabulary terms (matrix rows).
    #[inline]
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Number of documents (matrix columns).
    #[inline]
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Vocabulary terms in row order.
    #[inline]
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    /// Document ids in column order.
    #[inline]
    pub fn documents(&self) -> impl Iterator<Item = &K> {
        self.documents.iter()
    }

    /// Row index of a vocabulary term, if present.
    #[inline]
    pub fn term_row(&self, term: &str) -> Option<usize> {
        self.terms.get_index_of(term)
    }

    fn document_column(&self, document: &K) -> Result<usize> {
        self.documents
            .get_index_of(document)
            .ok_or_else(|| AnalyzerError::UnknownDocument(format!("{document:?}")))
    }
}
