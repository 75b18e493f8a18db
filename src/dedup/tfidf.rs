//! Character n-gram TF-IDF vectors and cosine similarity.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use super::ngram::{extract_char_ngrams, total_count, NgramCounts};
use super::preprocess::comparison_text;
use crate::news::NewsItem;
use crate::TARGET_DEDUP;

/// N-grams in fewer documents than this are single-document noise.
pub const MIN_DOCUMENT_FREQUENCY: usize = 2;

/// N-grams in more than this share of documents carry no signal.
pub const MAX_DOCUMENT_FREQUENCY_RATIO: f64 = 0.9;

/// Below this batch size IDF is degenerate (ln(N/DF) is 0 for every term
/// shared by a pair), so plain term frequency is used instead.
pub const MIN_BATCH_FOR_IDF: usize = 3;

/// Batch-local term identifier assigned by the vocabulary.
pub type TermId = u32;

/// Sparse weight vector, entries sorted by term id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(TermId, f64)>,
}

impl SparseVector {
    pub fn from_entries(mut entries: Vec<(TermId, f64)>) -> Self {
        entries.retain(|(_, w)| *w != 0.0 && w.is_finite());
        entries.sort_unstable_by_key(|(term, _)| *term);
        entries.dedup_by_key(|(term, _)| *term);
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f64)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt()
    }

    pub fn weight(&self, term: TermId) -> f64 {
        self.entries
            .binary_search_by_key(&term, |(t, _)| *t)
            .map(|idx| self.entries[idx].1)
            .unwrap_or(0.0)
    }
}

/// One article's n-gram counts and weights for a single clustering run.
#[derive(Debug)]
pub struct DocumentVector<'a> {
    pub item: &'a NewsItem,
    pub ngrams: NgramCounts,
    pub tfidf: SparseVector,
}

/// Cosine similarity over the union of both vectors' terms.
///
/// Terms missing from one side weigh 0. Returns 0 when either vector has zero
/// norm, and the result is clamped to [0, 1]. Symmetric: the merge visits
/// shared terms in the same order regardless of argument order.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    cosine_from_parts(dot(a, b), a.norm(), b.norm())
}

/// Dot product by merge-join over the sorted entries.
pub(crate) fn dot(a: &SparseVector, b: &SparseVector) -> f64 {
    let (mut i, mut j) = (0, 0);
    let mut dot = 0.0;
    while i < a.entries.len() && j < b.entries.len() {
        let (term_a, weight_a) = a.entries[i];
        let (term_b, weight_b) = b.entries[j];
        match term_a.cmp(&term_b) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                dot += weight_a * weight_b;
                i += 1;
                j += 1;
            }
        }
    }
    dot
}

pub(crate) fn cosine_from_parts(dot: f64, norm_a: f64, norm_b: f64) -> f64 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
}

/// Build TF-IDF vectors for a batch, aligned by index with `items`.
///
/// TF is `count / total n-grams in the document`, IDF is `ln(N / DF)`.
/// N-grams with DF below [`MIN_DOCUMENT_FREQUENCY`] or above
/// [`MAX_DOCUMENT_FREQUENCY_RATIO`]·N are dropped. Single-document batches
/// get an empty vector; callers are expected to bypass vectorization for them.
pub fn build_tfidf_vectors(
    items: &[NewsItem],
    ngram_min: usize,
    ngram_max: usize,
) -> Vec<DocumentVector<'_>> {
    let n = items.len();

    let mut vocabulary: HashMap<String, TermId> = HashMap::new();
    let mut doc_freq: Vec<usize> = Vec::new();
    let mut per_doc: Vec<(NgramCounts, Vec<(TermId, usize)>)> = Vec::with_capacity(n);

    // First pass: extract n-grams and count document frequency
    for item in items {
        let ngrams = extract_char_ngrams(&comparison_text(item), ngram_min, ngram_max);
        // Sorted so term ids, and with them summation order, are reproducible
        let mut grams: Vec<(&String, &usize)> = ngrams.iter().collect();
        grams.sort_unstable();

        let mut terms = Vec::with_capacity(grams.len());
        for (gram, &count) in grams {
            let next_id = vocabulary.len() as TermId;
            let id = *vocabulary.entry(gram.clone()).or_insert(next_id);
            if id as usize == doc_freq.len() {
                doc_freq.push(0);
            }
            doc_freq[id as usize] += 1;
            terms.push((id, count));
        }
        per_doc.push((ngrams, terms));
    }

    let use_idf = n >= MIN_BATCH_FOR_IDF;
    let max_df = n as f64 * MAX_DOCUMENT_FREQUENCY_RATIO;

    // Second pass: weight each document's terms
    let vectors: Vec<DocumentVector<'_>> = items
        .iter()
        .zip(per_doc)
        .map(|(item, (ngrams, terms))| {
            let total = total_count(&ngrams);
            let entries = if total == 0 || n <= 1 {
                Vec::new()
            } else if use_idf {
                terms
                    .iter()
                    .filter(|(id, _)| {
                        let df = doc_freq[*id as usize];
                        df >= MIN_DOCUMENT_FREQUENCY && (df as f64) <= max_df
                    })
                    .map(|&(id, count)| {
                        let tf = count as f64 / total as f64;
                        let idf = (n as f64 / doc_freq[id as usize] as f64).ln();
                        (id, tf * idf)
                    })
                    .collect()
            } else {
                terms
                    .iter()
                    .map(|&(id, count)| (id, count as f64 / total as f64))
                    .collect()
            };

            DocumentVector {
                item,
                ngrams,
                tfidf: SparseVector::from_entries(entries),
            }
        })
        .collect();

    debug!(
        target: TARGET_DEDUP,
        "Built {} vectors over a vocabulary of {} n-grams (idf={})",
        vectors.len(),
        vocabulary.len(),
        use_idf
    );

    vectors
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn vector(entries: &[(TermId, f64)]) -> SparseVector {
        SparseVector::from_entries(entries.to_vec())
    }

    #[test]
    fn test_cosine_self_similarity() {
        let v = vector(&[(3, 0.2), (1, 0.7), (9, 1.5)]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_cosine_symmetry_and_disjoint() {
        let a = vector(&[(1, 0.3), (2, 0.4), (5, 0.1)]);
        let b = vector(&[(2, 0.9), (5, 0.2), (7, 0.6)]);
        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));

        let c = vector(&[(10, 1.0)]);
        assert_eq!(cosine_similarity(&a, &c), 0.0);
    }

    #[test]
    fn test_cosine_zero_norm() {
        let empty = SparseVector::default();
        let v = vector(&[(1, 1.0)]);
        assert_eq!(cosine_similarity(&empty, &v), 0.0);
        assert_eq!(cosine_similarity(&v, &empty), 0.0);
        assert_eq!(cosine_similarity(&empty, &empty), 0.0);
        assert!(!cosine_similarity(&empty, &empty).is_nan());
    }

    #[test]
    fn test_sparse_vector_drops_zero_weights() {
        let v = vector(&[(2, 0.0), (1, 0.5)]);
        assert_eq!(v.len(), 1);
        assert_eq!(v.weight(1), 0.5);
        assert_eq!(v.weight(2), 0.0);
    }

    #[test]
    fn test_single_document_has_empty_vector() {
        let items = vec![NewsItem::new("삼성전자 실적 발표", "3분기 영업이익")];
        let vectors = build_tfidf_vectors(&items, 3, 5);
        assert_eq!(vectors.len(), 1);
        assert!(vectors[0].tfidf.is_empty());
        assert!(!vectors[0].ngrams.is_empty());
    }

    #[test]
    fn test_document_frequency_band() {
        // "공통" appears everywhere, "희귀" only once; neither survives.
        let items = vec![
            NewsItem::new("공통 현대차 수소트럭 수출", ""),
            NewsItem::new("공통 현대차 수소트럭 수출", ""),
            NewsItem::new("공통 한화오션 잠수함 수주", ""),
            NewsItem::new("공통 한화오션 잠수함 수주 희귀", ""),
            NewsItem::new("공통 포스코 리튬 공장", ""),
        ];
        let vectors = build_tfidf_vectors(&items, 3, 3);
        let first = &vectors[0];
        let fourth = &vectors[3];

        assert!(!first.tfidf.is_empty());
        // 5 docs, max DF = 4.5: "공통 " n-grams are in all 5 and dropped
        assert!(first.tfidf.entries().iter().all(|(_, w)| *w > 0.0));
        assert!(cosine_similarity(&first.tfidf, &vectors[1].tfidf) > 0.99);
        assert!(cosine_similarity(&first.tfidf, &vectors[2].tfidf) < 0.1);
        assert!(cosine_similarity(&vectors[2].tfidf, &fourth.tfidf) > 0.8);
    }

    #[test]
    fn test_pair_batch_uses_term_frequency() {
        let items = vec![
            NewsItem::new("Samsung Electronics Q3 profit up 20%", ""),
            NewsItem::new("Samsung Electronics Q3 profit up 20%", ""),
        ];
        let vectors = build_tfidf_vectors(&items, 3, 5);
        assert!(!vectors[0].tfidf.is_empty());
        let sim = cosine_similarity(&vectors[0].tfidf, &vectors[1].tfidf);
        assert!((sim - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn test_empty_texts_do_not_panic() {
        let items = vec![
            NewsItem::new("", ""),
            NewsItem::new("", "완전히 다른 설명"),
            NewsItem::new("", ""),
        ];
        let vectors = build_tfidf_vectors(&items, 3, 5);
        assert_eq!(vectors.len(), 3);
        assert!(vectors[0].tfidf.is_empty());
        assert_eq!(cosine_similarity(&vectors[0].tfidf, &vectors[2].tfidf), 0.0);
    }
}
