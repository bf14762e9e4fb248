use std::fmt::Debug;
use std::hash::Hash;
use std::io::{Read, Write};
use std::time::Instant;

use indexmap::IndexMap;
use log::info;
use ndarray::Array2;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::analyzer::pca::{compute_pca, DEFAULT_DIM};
use crate::analyzer::source::{DocumentSource, VocabularyProvider};
use crate::analyzer::weighting::{GlobalWeight, LocalWeight};
use crate::analyzer::TdmBuilder;
use crate::error::Result;
use crate::utils::text::comment_terms;

/// Cache key for a built term-frequency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TdmKey {
    /// how many words the vocabulary provider was asked for
    pub vocab_size: usize,
    /// whether comment tokens were counted on top of the tags
    pub with_comments: bool,
}

/// Cache key for a computed projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectionKey {
    pub vocab_size: usize,
    pub with_comments: bool,
    pub local: LocalWeight,
    pub global: GlobalWeight,
}

impl ProjectionKey {
    /// The term-frequency matrix this projection is derived from.
    #[inline]
    pub fn tdm_key(&self) -> TdmKey {
        TdmKey {
            vocab_size: self.vocab_size,
            with_comments: self.with_comments,
        }
    }
}

/// Session-scoped analysis state.
///
/// Owns the two caller-level caches: built term-frequency matrices keyed by
/// [`TdmKey`], and computed 2-D projections keyed by [`ProjectionKey`].
/// A cache hit returns the previously computed value without touching the
/// provider, the source, or the numeric pipeline.
///
/// Both caches grow without eviction; the caller bounds the number of
/// distinct key combinations it requests within one session.
///
/// # Serialization
/// Supported, including the full matrix state; see
/// [`save_snapshot`](Self::save_snapshot) /
/// [`load_snapshot`](Self::load_snapshot) for the CBOR form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSession<K = u64>
where
    K: Eq + Hash + Clone + Debug,
{
    tdms: IndexMap<TdmKey, TdmBuilder<K>>,
    projections: IndexMap<ProjectionKey, Array2<f64>>,
}

impl<K> Default for AnalysisSession<K>
where
    K: Eq + Hash + Clone + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AnalysisSession<K>
where
    K: Eq + Hash + Clone + Debug,
{
    pub fn new() -> Self {
        Self {
            tdms: IndexMap::new(),
            projections: IndexMap::new(),
        }
    }

    /// Already-built term-frequency matrices, in build order.
    pub fn cached_tdms(&self) -> impl Iterator<Item = (&TdmKey, &TdmBuilder<K>)> {
        self.tdms.iter()
    }

    /// Already-computed projections, in computation order.
    pub fn cached_projections(&self) -> impl Iterator<Item = (&ProjectionKey, &Array2<f64>)> {
        self.projections.iter()
    }

    /// Build the term-frequency matrix for `key`, or return the cached one.
    ///
    /// A fresh build asks the provider for the vocabulary (stop words
    /// removed), the source for the document ids and tag pairs, and, when
    /// the key says so, counts the normalized comment tokens on top.
    pub fn build_tdm<P, S>(&mut self, key: TdmKey, lexicon: &P, source: &S) -> Result<&TdmBuilder<K>>
    where
        P: VocabularyProvider,
        S: DocumentSource<K>,
    {
        if !self.tdms.contains_key(&key) {
            let started = Instant::now();
            let vocabulary = lexicon.vocabulary(key.vocab_size, true)?;
            let documents = source.document_ids()?;
            let mut builder = TdmBuilder::new(vocabulary, documents)?;

            for (document, tag) in source.tags()? {
                builder.add_term(&document, &tag)?;
            }
            if key.with_comments {
                for (document, text) in source.comments()? {
                    let terms = comment_terms(&text);
                    builder.add_terms(&document, &terms)?;
                }
            }

            info!(
                "built {}x{} term-frequency matrix for {:?} in {:?}",
                builder.term_count(),
                builder.document_count(),
                key,
                started.elapsed()
            );
            self.tdms.insert(key, builder);
        }
        Ok(&self.tdms[&key])
    }

    /// Compute the 2-D projection for `key`, or return the cached one.
    pub fn project<P, S>(&mut self, key: ProjectionKey, lexicon: &P, source: &S) -> Result<&Array2<f64>>
    where
        P: VocabularyProvider,
        S: DocumentSource<K>,
    {
        if !self.projections.contains_key(&key) {
            self.build_tdm(key.tdm_key(), lexicon, source)?;
            let builder = &self.tdms[&key.tdm_key()];

            let started = Instant::now();
            let weighted = builder.build_matrix(key.local, key.global);
            let projection = compute_pca(&weighted, DEFAULT_DIM)?;
            info!("computed projection for {:?} in {:?}", key, started.elapsed());
            self.projections.insert(key, projection);
        }
        Ok(&self.projections[&key])
    }
}

impl<K> AnalysisSession<K>
where
    K: Eq + Hash + Clone + Debug + Serialize + DeserializeOwned,
{
    /// Write the whole session state (matrices and projections) as CBOR.
    pub fn save_snapshot<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    /// Restore a session previously written by
    /// [`save_snapshot`](Self::save_snapshot).
    pub fn load_snapshot<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_cbor::from_reader(reader)?)
    }
}
