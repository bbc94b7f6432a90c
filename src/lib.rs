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

extern crate csv;
extern crate fnv;
extern crate scoped_pool;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate thiserror;
#[macro_use]
extern crate tracing;

use std::time::Instant;

pub mod error;
pub mod types;
pub mod utils;
pub mod stopwords;
pub mod signature;
pub mod vectorize;
pub mod similarity;
pub mod catalog;
pub mod recommend;
pub mod io;

mod usage_tests;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use recommend::recommend;
pub use types::MovieRecord;

/// Builds the catalog for a list of movies, in the given order: derives a text signature per
/// movie, learns TF-IDF vectors from the signatures and computes the pairwise cosine similarities
/// of all movies on `pool_size` threads. Fails with `Error::EmptyVocabulary` if the signatures
/// contain no usable terms at all.
pub fn build_catalog(movies: Vec<MovieRecord>, pool_size: usize) -> Result<Catalog> {

    let build_start = Instant::now();

    let mut titles: Vec<String> = Vec::with_capacity(movies.len());
    let mut signatures: Vec<String> = Vec::with_capacity(movies.len());

    for movie in movies.into_iter() {
        signatures.push(signature::build_signature(&movie.overview, &movie.cast, &movie.crew));
        titles.push(movie.title);
    }

    info!("Built {} signatures", signatures.len());

    let (vocabulary, vectors) = vectorize::fit_transform(&signatures)?;

    let num_zero_vectors = vectors.iter().filter(|vector| vector.is_empty()).count();
    if num_zero_vectors > 0 {
        warn!("{} movies have no usable terms and will only be recommended last", num_zero_vectors);
    }

    info!("Vectorized {} movies over {} terms", vectors.len(), vocabulary.len());

    let similarities = similarity::cosine_similarity_matrix(&vectors, pool_size);

    info!("Catalog built in {}ms", utils::to_millis(build_start.elapsed()));

    Ok(Catalog::new(titles, vocabulary, vectors, similarities))
}
