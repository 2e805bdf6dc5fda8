//! Top-K ranking over one row of the similarity matrix.

use crate::error::Result;
use crate::similarity::SimilarityMatrix;
use data_loader::ItemId;
use serde::Serialize;
use std::cmp::Ordering;

/// A recommended item and its similarity to the seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedItem {
    pub id: ItemId,
    pub score: f32,
}

/// Best first; equal scores by ascending id.
fn by_rank(a: &RankedItem, b: &RankedItem) -> Ordering {
    b.score.total_cmp(&a.score).then(a.id.cmp(&b.id))
}

/// Ranks items by similarity to a seed item.
#[derive(Debug, Clone, Copy)]
pub struct Ranker<'a> {
    matrix: &'a SimilarityMatrix,
}

impl<'a> Ranker<'a> {
    pub fn new(matrix: &'a SimilarityMatrix) -> Self {
        Self { matrix }
    }

    /// The `k` items most similar to `seed`, excluding `seed` itself.
    ///
    /// Returns `min(k, N - 1)` items. Fails only if `seed` is not a row of
    /// the matrix.
    pub fn top_k(&self, seed: ItemId, k: usize) -> Result<Vec<RankedItem>> {
        let row = self.matrix.row(seed)?;
        if k == 0 {
            return Ok(Vec::new());
        }

        let mut ranked: Vec<RankedItem> = row
            .iter()
            .enumerate()
            .filter(|&(id, _)| id != seed)
            .map(|(id, &score)| RankedItem { id, score })
            .collect();

        if ranked.len() > k {
            ranked.select_nth_unstable_by(k - 1, by_rank);
            ranked.truncate(k);
        }
        ranked.sort_unstable_by(by_rank);
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::vectorizer::FeatureVector;

    fn matrix() -> SimilarityMatrix {
        let v = |entries: &[(u32, f32)]| FeatureVector::from_entries(3, entries.to_vec());
        SimilarityMatrix::from_vectors(&[
            v(&[(0, 1.0), (1, 1.0)]),
            v(&[(0, 1.0)]),
            v(&[(1, 1.0)]),
            v(&[(2, 1.0)]),
            v(&[(0, 1.0), (1, 1.0), (2, 0.1)]),
        ])
    }

    #[test]
    fn test_seed_is_excluded() {
        let matrix = matrix();
        let ranked = Ranker::new(&matrix).top_k(0, 10).unwrap();

        assert_eq!(ranked.len(), 4);
        assert!(ranked.iter().all(|r| r.id != 0));
    }

    #[test]
    fn test_order_and_ties() {
        let matrix = matrix();
        let ranked = Ranker::new(&matrix).top_k(0, 4).unwrap();
        let ids: Vec<ItemId> = ranked.iter().map(|r| r.id).collect();

        // 4 is nearly parallel to 0; 1 and 2 tie and keep id order; 3 is orthogonal
        assert_eq!(ids, vec![4, 1, 2, 3]);
        assert_eq!(ranked[1].score, ranked[2].score);
        assert_eq!(ranked[3].score, 0.0);
    }

    #[test]
    fn test_truncation_keeps_the_best() {
        let matrix = matrix();
        let ranker = Ranker::new(&matrix);

        let top2: Vec<ItemId> = ranker.top_k(0, 2).unwrap().iter().map(|r| r.id).collect();
        assert_eq!(top2, vec![4, 1]);
        assert_eq!(ranker.top_k(0, 1).unwrap()[0].id, 4);
    }

    #[test]
    fn test_zero_k_and_single_item() {
        let matrix = matrix();
        assert!(Ranker::new(&matrix).top_k(2, 0).unwrap().is_empty());

        let single = SimilarityMatrix::from_vectors(&[FeatureVector::from_entries(1, vec![(0, 1.0)])]);
        assert!(Ranker::new(&single).top_k(0, 5).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_seed() {
        let matrix = matrix();
        assert_eq!(
            Ranker::new(&matrix).top_k(5, 3),
            Err(EngineError::UnknownItem { id: 5, len: 5 })
        );
    }
}
