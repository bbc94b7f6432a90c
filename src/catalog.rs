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

use fnv::FnvHashMap;

use crate::error::Result;
use crate::recommend;
use crate::types::{DenseVector, SimilarityMatrix, SparseMatrix, SparseVector};
use crate::vectorize::Vocabulary;

/// The movies of one run in load order, together with their vectors and pairwise similarities.
/// Vector i and similarity row i always belong to the movie at index i. A catalog is immutable
/// once built and can be queried from several threads at once.
pub struct Catalog {
    titles: Vec<String>,
    title_dict: FnvHashMap<String, u32>,
    vocabulary: Vocabulary,
    vectors: SparseMatrix,
    similarities: SimilarityMatrix,
}

impl Catalog {

    pub(crate) fn new(
        titles: Vec<String>,
        vocabulary: Vocabulary,
        vectors: SparseMatrix,
        similarities: SimilarityMatrix,
    ) -> Self {

        let mut title_dict: FnvHashMap<String, u32> =
            FnvHashMap::with_capacity_and_hasher(titles.len(), Default::default());

        // Duplicate titles resolve to their first occurrence in load order
        for (index, title) in titles.iter().enumerate() {
            title_dict.entry(title.clone()).or_insert(index as u32);
        }

        Catalog { titles, title_dict, vocabulary, vectors, similarities }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn title(&self, index: u32) -> &str {
        &self.titles[index as usize]
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Index of the first movie with exactly this title.
    pub fn index_of(&self, title: &str) -> Option<u32> {
        self.title_dict.get(title).cloned()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn vector(&self, index: u32) -> &SparseVector {
        &self.vectors[index as usize]
    }

    pub fn similarities(&self, index: u32) -> &DenseVector {
        &self.similarities[index as usize]
    }

    pub fn recommend(&self, title: &str, num_recommendations: usize) -> Result<Vec<&str>> {
        recommend::recommend(self, title, num_recommendations)
    }
}
