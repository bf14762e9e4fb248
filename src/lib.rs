/// This crate builds weighted Term-Document Matrices over fixed tag/comment
/// vocabularies and projects them to 2-D coordinates for visualization.
pub mod analyzer;
pub mod error;
pub mod utils;

/// Term-Document Matrix Builder
/// The central accumulation struct of this crate. It counts term occurrences
/// per (term, document) cell over a fixed vocabulary and document set, and
/// materializes weighted matrices under any local/global weighting pair.
///
/// Internally, it holds:
/// - The ordered vocabulary with O(1) term-to-row lookup
/// - The ordered document ids with O(1) id-to-column lookup
/// - The raw term-frequency matrix
///
/// `TdmBuilder<K>` is generic over the document key type `K` (e.g. `u64`,
/// `String`).
///
/// # Serialization
/// Supported; the full count state round-trips.
pub use analyzer::TdmBuilder;

/// Weighting scheme selectors
/// Local weights transform a single raw count; global weights scale a whole
/// term row by its distribution across all documents. Both enums map
/// arbitrary user-supplied indices back into range via `from_index`, so
/// out-of-range input wraps instead of failing.
pub use analyzer::weighting::{GlobalWeight, LocalWeight};

/// Weighted-matrix derivation over an arbitrary base matrix.
/// Used by `TdmBuilder::build_matrix` internally; exposed for callers that
/// cached a raw matrix elsewhere. The binary/raw fast paths alias or rebuild
/// without scanning; treat the result as read-only.
pub use analyzer::weighting::weight_matrix;

/// PCA projection
/// Reduces a terms x documents matrix to a small-dimension x documents
/// coordinate matrix by mean-centering, eigen-decomposing the symmetrized
/// term covariance, and projecting onto the top eigenvectors. A pure
/// transform with no state between calls.
pub use analyzer::pca::{compute_pca, DEFAULT_DIM};

/// Analysis session
/// Session-scoped caches of built term-frequency matrices (`TdmKey`) and
/// computed projections (`ProjectionKey`), plus the orchestration from
/// vocabulary provider and document source to cached 2-D coordinates.
///
/// # Serialization
/// Supported; snapshots round-trip as CBOR via `save_snapshot` /
/// `load_snapshot`.
pub use analyzer::session::{AnalysisSession, ProjectionKey, TdmKey};

/// Boundary contracts and plot preparation
/// `VocabularyProvider` and `DocumentSource` are the seams to the word-list
/// and repository collaborators, with in-memory implementations
/// (`StaticLexicon`, `MemorySource`) for callers that already hold the data.
/// `scatter_groups` turns a projection plus per-document labels into
/// stable-colored plot series for an external rendering surface, and
/// `ProjectionConsumer` streams (x, y, label) triples to one.
pub use analyzer::source::{
    emit_projection, scatter_groups, DocumentSource, MemorySource, ProjectionConsumer,
    ScatterGroup, StaticLexicon, VocabularyProvider, PALETTE,
};

/// Crate error type and result alias.
pub use error::{AnalyzerError, Result};
