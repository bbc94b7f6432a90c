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

use std::collections::BTreeMap;

use fnv::{FnvHashMap, FnvHashSet};

use crate::error::{Error, Result};
use crate::stopwords::StopWords;
use crate::types::{DenseVector, SparseMatrix, SparseVector};

/// Tokens need at least this many word characters, shorter ones (and all punctuation) are dropped.
const MIN_TOKEN_LENGTH: usize = 2;

/// The terms of a corpus in lexicographic order, the position of a term is its coordinate.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: FnvHashMap<String, u32>,
}

impl Vocabulary {

    fn from_sorted_terms(terms: Vec<String>) -> Self {
        let index = terms.iter()
            .enumerate()
            .map(|(position, term)| (term.clone(), position as u32))
            .collect();

        Vocabulary { terms, index }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn term(&self, index: u32) -> &str {
        &self.terms[index as usize]
    }

    pub fn index_of(&self, term: &str) -> Option<u32> {
        self.index.get(term).cloned()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

/// Lowercases the text and splits it into runs of word characters (alphanumerics and '_'),
/// dropping short tokens and stop words.
pub fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.chars().count() >= MIN_TOKEN_LENGTH)
        .filter(|token| !stop_words.contains(token))
        .map(String::from)
        .collect()
}

/// TF-IDF vectorizer with smoothed inverse document frequencies
///
///   idf(t) = ln((1 + N) / (1 + df(t))) + 1
///
/// where N is the number of documents and df(t) the number of documents containing t. The weight
/// of a term is its raw count times its idf, every vector is scaled to unit length afterwards.
pub struct Vectorizer {
    stop_words: StopWords,
    vocabulary: Vocabulary,
    idf: DenseVector,
}

impl Vectorizer {

    /// Learns vocabulary and idf weights from the documents and returns the fitted vectorizer
    /// together with the vectors of the documents, in document order.
    pub fn fit_transform<S>(documents: &[S]) -> Result<(Self, SparseMatrix)> where S: AsRef<str> {

        let stop_words = StopWords::english();

        let tokenized: Vec<Vec<String>> = documents.iter()
            .map(|document| tokenize(document.as_ref(), &stop_words))
            .collect();

        let mut document_frequencies: BTreeMap<&str, u32> = BTreeMap::new();

        for tokens in tokenized.iter() {
            let distinct_tokens: FnvHashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in distinct_tokens {
                *document_frequencies.entry(token).or_insert(0) += 1;
            }
        }

        if document_frequencies.is_empty() {
            return Err(Error::EmptyVocabulary);
        }

        let num_documents = documents.len() as f64;

        let idf: DenseVector = document_frequencies.values()
            .map(|&df| ((1.0 + num_documents) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let terms: Vec<String> = document_frequencies.keys().map(|term| term.to_string()).collect();

        let vectorizer = Vectorizer {
            stop_words,
            vocabulary: Vocabulary::from_sorted_terms(terms),
            idf,
        };

        let vectors = tokenized.iter()
            .map(|tokens| vectorizer.weigh(tokens))
            .collect();

        Ok((vectorizer, vectors))
    }

    /// Vector of a new text in the learned space, terms outside of the vocabulary are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text, &self.stop_words))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn into_vocabulary(self) -> Vocabulary {
        self.vocabulary
    }

    pub fn idf(&self, term_index: u32) -> f64 {
        self.idf[term_index as usize]
    }

    fn weigh(&self, tokens: &[String]) -> SparseVector {

        let mut term_counts: FnvHashMap<u32, u32> =
            FnvHashMap::with_capacity_and_hasher(tokens.len(), Default::default());

        for token in tokens {
            if let Some(term_index) = self.vocabulary.index_of(token) {
                *term_counts.entry(term_index).or_insert(0) += 1;
            }
        }

        let mut vector: SparseVector = term_counts.into_iter()
            .map(|(term_index, count)| (term_index, count as f64 * self.idf[term_index as usize]))
            .collect();

        vector.sort_by_key(|&(term_index, _)| term_index);

        normalize(&mut vector);
        vector
    }
}

/// Vocabulary and document vectors of a corpus, in document order.
pub fn fit_transform<S>(documents: &[S]) -> Result<(Vocabulary, SparseMatrix)>
    where S: AsRef<str> {

    let (vectorizer, vectors) = Vectorizer::fit_transform(documents)?;
    Ok((vectorizer.into_vocabulary(), vectors))
}

/// Scales the vector to unit L2 norm, zero vectors stay zero.
fn normalize(vector: &mut SparseVector) {

    let norm = vector.iter()
        .map(|&(_, weight)| weight * weight)
        .sum::<f64>()
        .sqrt();

    if norm > 0.0 {
        for entry in vector.iter_mut() {
            entry.1 /= norm;
        }
    }
}
