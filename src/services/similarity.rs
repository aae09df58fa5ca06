//! Dense pairwise cosine similarity.

use crate::services::weighting::FeatureMatrix;

/// Square `n x n` matrix of cosine similarities between catalog rows
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Computes every pair eagerly: O(n² · d) time, O(n² + n · d) space.
    ///
    /// A pair involving an all-zero vector has similarity 0, including the
    /// diagonal entry of that vector. Each row is divided by its largest
    /// absolute component first; cosine is scale-invariant, and unit-bounded
    /// components keep every dot product far from overflow.
    pub fn cosine(features: &FeatureMatrix) -> Self {
        let size = features.rows();
        let rows: Vec<Vec<f64>> = (0..size).map(|i| unit_scaled(features.row(i))).collect();
        let norms: Vec<f64> = rows.iter().map(|row| norm(row)).collect();
        let mut data = vec![0.0; size * size];

        for i in 0..size {
            for j in i..size {
                let denom = norms[i] * norms[j];
                let sim = if denom == 0.0 {
                    0.0
                } else {
                    dot(&rows[i], &rows[j]) / denom
                };
                data[i * size + j] = sim;
                data[j * size + i] = sim;
            }
        }

        Self { size, data }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.size..(i + 1) * self.size]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.size + j]
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Divides by the largest absolute component; an all-zero row stays zero
fn unit_scaled(v: &[f64]) -> Vec<f64> {
    let max_abs = v.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if max_abs == 0.0 {
        v.to_vec()
    } else {
        v.iter().map(|x| x / max_abs).collect()
    }
}

fn norm(v: &[f64]) -> f64 {
    dot(v, v).sqrt()
}
