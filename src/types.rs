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

pub type DenseVector = Vec<f64>;

/// (term index, weight) pairs, sorted by term index.
pub type SparseVector = Vec<(u32, f64)>;
pub type SparseMatrix = Vec<SparseVector>;

/// Row i holds the similarities of item i to all items of the catalog.
pub type SimilarityMatrix = Vec<DenseVector>;

pub fn new_dense_vector(dimensions: usize) -> DenseVector {
    vec![0.0; dimensions]
}

pub fn new_similarity_matrix(num_rows: usize) -> SimilarityMatrix {
    vec![new_dense_vector(num_rows); num_rows]
}

/// One row of the joined input table, the unit the catalog is built from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieRecord {
    pub title: String,
    pub overview: String,
    pub cast: String,
    pub crew: String,
}

impl MovieRecord {

    pub fn new(title: &str, overview: &str, cast: &str, crew: &str) -> Self {
        MovieRecord {
            title: title.to_string(),
            overview: overview.to_string(),
            cast: cast.to_string(),
            crew: crew.to_string(),
        }
    }
}
