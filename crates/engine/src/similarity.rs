//! Pairwise cosine similarity between item vectors.
//!
//! The full N x N matrix is computed once when the content model is built
//! and is read-only afterwards. Rows are filled in parallel with Rayon.

use crate::error::{EngineError, Result};
use crate::vectorizer::FeatureVector;
use data_loader::ItemId;
use rayon::prelude::*;

/// Cosine similarity of two vectors.
///
/// Defined as 0 when either vector has zero magnitude.
pub fn cosine_similarity(a: &FeatureVector, b: &FeatureVector) -> f32 {
    let denominator = f64::from(a.norm()) * f64::from(b.norm());
    if denominator == 0.0 {
        return 0.0;
    }
    ((a.dot(b) / denominator) as f32).clamp(-1.0, 1.0)
}

/// Dense, row-major, symmetric similarity matrix indexed by `ItemId`.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    size: usize,
    values: Vec<f32>,
}

impl SimilarityMatrix {
    /// Compute the matrix for `vectors`, where `vectors[id]` belongs to item `id`.
    ///
    /// The diagonal is exactly 1.0, or 0.0 for a zero vector.
    pub fn from_vectors(vectors: &[FeatureVector]) -> Self {
        let size = vectors.len();
        let mut values = vec![0.0f32; size * size];

        if size > 0 {
            values
                .par_chunks_mut(size)
                .enumerate()
                .for_each(|(i, row)| {
                    let a = &vectors[i];
                    for (j, value) in row.iter_mut().enumerate() {
                        *value = if i == j {
                            if a.is_zero() { 0.0 } else { 1.0 }
                        } else {
                            cosine_similarity(a, &vectors[j])
                        };
                    }
                });
        }

        Self { size, values }
    }

    /// Number of items (rows and columns)
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity of items `i` and `j`
    pub fn get(&self, i: ItemId, j: ItemId) -> Option<f32> {
        if i < self.size && j < self.size {
            Some(self.values[i * self.size + j])
        } else {
            None
        }
    }

    /// Similarities of item `id` to every item, indexed by `ItemId`
    pub fn row(&self, id: ItemId) -> Result<&[f32]> {
        if id >= self.size {
            return Err(EngineError::UnknownItem {
                id,
                len: self.size,
            });
        }
        Ok(&self.values[id * self.size..(id + 1) * self.size])
    }
}
