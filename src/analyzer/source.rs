use indexmap::IndexMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzerError, Result};

/// Supplies the fixed reference vocabulary: the `size` most frequent words,
/// optionally with common stop words removed. Implementations must be
/// deterministic for a fixed `(size, remove_common_words)` pair, since the
/// session caches matrices by vocabulary size alone.
pub trait VocabularyProvider {
    fn vocabulary(&self, size: usize, remove_common_words: bool) -> Result<Vec<String>>;
}

/// In-memory vocabulary backed by a pre-ranked word list (most frequent
/// first) and a stop-word list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticLexicon {
    words: Vec<String>,
    stop_words: Vec<String>,
}

impl StaticLexicon {
    pub fn new<W, S>(words: W, stop_words: S) -> Self
    where
        W: IntoIterator,
        W::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            stop_words: stop_words.into_iter().map(Into::into).collect(),
        }
    }
}

impl VocabularyProvider for StaticLexicon {
    fn vocabulary(&self, size: usize, remove_common_words: bool) -> Result<Vec<String>> {
        let ranked = self.words.iter().map(|w| w.to_lowercase());
        let words = if remove_common_words {
            ranked
                .filter(|w| !self.stop_words.iter().any(|s| s == w))
                .take(size)
                .collect()
        } else {
            ranked.take(size).collect()
        };
        Ok(words)
    }
}

/// Enumerates the stored repository content the matrices are built from:
/// the ordered document ids, the per-document tag terms, the per-document
/// free-text comments, and the search-tag label used to group documents in
/// a plot.
pub trait DocumentSource<K> {
    /// Ordered unique document ids; positions define the matrix columns.
    fn document_ids(&self) -> Result<Vec<K>>;
    /// (document, term) pairs, one per tag association.
    fn tags(&self) -> Result<Vec<(K, String)>>;
    /// (document, free text) pairs, one per comment.
    fn comments(&self) -> Result<Vec<(K, String)>>;
    /// (document, label) pairs in document order, for plot grouping.
    fn labels(&self) -> Result<Vec<(K, String)>>;
}

/// A document source over data the caller already holds in memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemorySource<K> {
    pub documents: Vec<K>,
    pub tags: Vec<(K, String)>,
    pub comments: Vec<(K, String)>,
    pub labels: Vec<(K, String)>,
}

impl<K: Clone> DocumentSource<K> for MemorySource<K> {
    fn document_ids(&self) -> Result<Vec<K>> {
        Ok(self.documents.clone())
    }

    fn tags(&self) -> Result<Vec<(K, String)>> {
        Ok(self.tags.clone())
    }

    fn comments(&self) -> Result<Vec<(K, String)>> {
        Ok(self.comments.clone())
    }

    fn labels(&self) -> Result<Vec<(K, String)>> {
        Ok(self.labels.clone())
    }
}

/// Receives one projected document at a time: its 2-D coordinate and the
/// label used for grouping/coloring.
pub trait ProjectionConsumer {
    fn accept(&mut self, x: f64, y: f64, label: &str);
}

/// Feed every projected document to a consumer, pairing projection columns
/// with the label list by position.
pub fn emit_projection<K, C>(
    projection: &Array2<f64>,
    labels: &[(K, String)],
    consumer: &mut C,
) -> Result<()>
where
    C: ProjectionConsumer,
{
    check_plottable(projection, labels.len())?;
    for (j, (_, label)) in labels.iter().enumerate() {
        consumer.accept(projection[[0, j]], projection[[1, j]], label);
    }
    Ok(())
}

/// Stable scatter color map; labels are assigned palette entries by their
/// position in the sorted distinct-label list, wrapping when there are more
/// labels than colors.
pub const PALETTE: [&str; 10] = [
    "#000000", "#6600FF", "#FF9933", "#0033FF", "#00FFFF", "#FFFF33", "#006600", "#666666",
    "#666600", "#FF00CC",
];

/// One plot series: every projected document sharing a label, with its
/// assigned color.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    pub label: String,
    pub color: &'static str,
    pub points: Vec<(f64, f64)>,
}

/// Group a 2-D projection into per-label scatter series.
///
/// Colors are repeatable across calls: the distinct labels are sorted and
/// each label keeps the palette entry at its sorted position, regardless of
/// any `only` filter applied on top. Groups come back in first-seen
/// document order.
pub fn scatter_groups<K>(
    projection: &Array2<f64>,
    labels: &[(K, String)],
    only: Option<&[String]>,
) -> Result<Vec<ScatterGroup>> {
    check_plottable(projection, labels.len())?;

    let mut distinct: Vec<&str> = labels.iter().map(|(_, label)| label.as_str()).collect();
    distinct.sort_unstable();
    distinct.dedup();

    let mut groups: IndexMap<&str, ScatterGroup> = IndexMap::new();
    for (j, (_, label)) in labels.iter().enumerate() {
        if let Some(only) = only {
            if !only.iter().any(|keep| keep == label) {
                continue;
            }
        }
        let group = groups.entry(label.as_str()).or_insert_with(|| {
            let position = distinct.binary_search(&label.as_str()).unwrap_or(0);
            ScatterGroup {
                label: label.clone(),
                color: PALETTE[position % PALETTE.len()],
                points: Vec::new(),
            }
        });
        group.points.push((projection[[0, j]], projection[[1, j]]));
    }
    Ok(groups.into_values().collect())
}

fn check_plottable(projection: &Array2<f64>, labels: usize) -> Result<()> {
    if projection.nrows() < 2 {
        return Err(AnalyzerError::NotTwoDimensional(projection.nrows()));
    }
    if projection.ncols() != labels {
        return Err(AnalyzerError::LabelMismatch {
            columns: projection.ncols(),
            labels,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    fn labels() -> Vec<(u64, String)> {
        vec![
            (1, "cat".to_string()),
            (2, "dog".to_string()),
            (3, "cat".to_string()),
            (4, "bird".to_string()),
        ]
    }

    fn projection() -> Array2<f64> {
        arr2(&[[1.0, 2.0, 3.0, 4.0], [-1.0, -2.0, -3.0, -4.0]])
    }

    #[test]
    fn lexicon_respects_size_and_stop_words() {
        let lexicon = StaticLexicon::new(
            vec!["The", "cat", "and", "dog", "bird"],
            vec!["the", "and"],
        );
        assert_eq!(
            lexicon.vocabulary(2, true).unwrap(),
            vec!["cat".to_string(), "dog".to_string()]
        );
        assert_eq!(
            lexicon.vocabulary(2, false).unwrap(),
            vec!["the".to_string(), "cat".to_string()]
        );
        // size beyond the list is truncated, not an error
        assert_eq!(lexicon.vocabulary(100, true).unwrap().len(), 3);
    }

    #[test]
    fn groups_carry_every_point_for_their_label() {
        let groups = scatter_groups(&projection(), &labels(), None).unwrap();
        assert_eq!(groups.len(), 3);

        let cat = groups.iter().find(|g| g.label == "cat").unwrap();
        assert_eq!(cat.points, vec![(1.0, -1.0), (3.0, -3.0)]);
        let bird = groups.iter().find(|g| g.label == "bird").unwrap();
        assert_eq!(bird.points, vec![(4.0, -4.0)]);
    }

    #[test]
    fn colors_follow_sorted_label_order() {
        let groups = scatter_groups(&projection(), &labels(), None).unwrap();
        // sorted distinct labels: bird, cat, dog
        let color_of = |label: &str| groups.iter().find(|g| g.label == label).unwrap().color;
        assert_eq!(color_of("bird"), PALETTE[0]);
        assert_eq!(color_of("cat"), PALETTE[1]);
        assert_eq!(color_of("dog"), PALETTE[2]);
    }

    #[test]
    fn filter_keeps_colors_stable() {
        let only = vec!["dog".to_string()];
        let groups = scatter_groups(&projection(), &labels(), Some(&only)).unwrap();
        assert_eq!(groups.len(), 1);
        // same palette slot as in the unfiltered plot
        assert_eq!(groups[0].color, PALETTE[2]);
        assert_eq!(groups[0].points, vec![(2.0, -2.0)]);
    }

    #[test]
    fn shape_mismatches_are_rejected() {
        let flat = arr2(&[[1.0, 2.0, 3.0, 4.0]]);
        assert!(matches!(
            scatter_groups(&flat, &labels(), None).unwrap_err(),
            AnalyzerError::NotTwoDimensional(1)
        ));

        let short = labels()[..2].to_vec();
        assert!(matches!(
            scatter_groups(&projection(), &short, None).unwrap_err(),
            AnalyzerError::LabelMismatch {
                columns: 4,
                labels: 2
            }
        ));
    }

    #[test]
    fn emit_walks_documents_in_column_order() {
        struct Collect(Vec<(f64, f64, String)>);
        impl ProjectionConsumer for Collect {
            fn accept(&mut self, x: f64, y: f64, label: &str) {
                self.0.push((x, y, label.to_string()));
            }
        }

        let mut sink = Collect(Vec::new());
        emit_projection(&projection(), &labels(), &mut sink).unwrap();
        assert_eq!(sink.0.len(), 4);
        assert_eq!(sink.0[0], (1.0, -1.0, "cat".to_string()));
        assert_eq!(sink.0[3], (4.0, -4.0, "bird".to_string()));
    }
}
