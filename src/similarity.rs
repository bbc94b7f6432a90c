/**
 * CineReco
 * Copyright (C) 2018 Sebastian Schelter
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <http://www.gnu.org/licenses/>.
 */

use std::time::Instant;

use scoped_pool::Pool;

use crate::types::{self, DenseVector, SimilarityMatrix, SparseVector};
use crate::utils;

/// Dot product of two sparse vectors whose entries are sorted by term index. The products are
/// always summed in ascending term order, so `dot(a, b)` and `dot(b, a)` are bitwise identical.
#[inline]
pub fn dot(vector_a: &SparseVector, vector_b: &SparseVector) -> f64 {

    let mut sum = 0.0;
    let (mut a, mut b) = (0, 0);

    while a < vector_a.len() && b < vector_b.len() {
        let (term_a, weight_a) = vector_a[a];
        let (term_b, weight_b) = vector_b[b];

        if term_a == term_b {
            sum += weight_a * weight_b;
            a += 1;
            b += 1;
        } else if term_a < term_b {
            a += 1;
        } else {
            b += 1;
        }
    }

    sum
}

/// Cosine similarity of two unit-length (or zero) vectors. Zero vectors have a similarity of 0 to
/// everything, themselves included.
#[inline]
pub fn cosine_similarity(vector_a: &SparseVector, vector_b: &SparseVector) -> f64 {
    dot(vector_a, vector_b).min(1.0)
}

/// Dense matrix of the pairwise cosine similarities of unit-length vectors. This is the expensive
/// part of the pipeline, quadratic in the number of vectors, and therefore computed row-wise on a
/// pool of `pool_size` threads.
pub fn cosine_similarity_matrix(vectors: &[SparseVector], pool_size: usize) -> SimilarityMatrix {

    let num_vectors = vectors.len();
    let mut similarities = types::new_similarity_matrix(num_vectors);

    let start = Instant::now();

    let pool = Pool::new(pool_size.max(1));

    pool.scoped(|scope| {
        for (index, row) in similarities.iter_mut().enumerate() {
            scope.execute(move || fill_row(index, vectors, row));
        }
    });

    pool.shutdown();

    info!(
        "Computed {}x{} similarity matrix in {}ms",
        num_vectors,
        num_vectors,
        utils::to_millis(start.elapsed())
    );

    similarities
}

fn fill_row(index: usize, vectors: &[SparseVector], row: &mut DenseVector) {

    let vector = &vectors[index];

    for (other_index, other_vector) in vectors.iter().enumerate() {
        row[other_index] = if other_index == index {
            if vector.is_empty() { 0.0 } else { 1.0 }
        } else {
            cosine_similarity(vector, other_vector)
        };
    }
}
