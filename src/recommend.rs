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

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

/// A candidate movie and its similarity to the query movie.
#[derive(PartialEq, Debug, Clone, Copy)]
pub struct ScoredItem {
    pub item: u32,
    pub score: f64,
}

/// Ranking order, better items compare as smaller: higher scores first, ties go to the lower
/// catalog index. The binary heap used for top-k selection is a max-heap, so its top always holds
/// the worst item kept so far. There is no total order on floating point numbers, incomparable
/// scores count as equal.
fn cmp_rank(scored_item_a: &ScoredItem, scored_item_b: &ScoredItem) -> Ordering {
    let by_score = match scored_item_a.score.partial_cmp(&scored_item_b.score) {
        Some(ordering) => ordering.reverse(),
        None => Ordering::Equal,
    };

    by_score.then_with(|| scored_item_a.item.cmp(&scored_item_b.item))
}

impl Eq for ScoredItem {}

impl Ord for ScoredItem {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_rank(self, other)
    }
}

impl PartialOrd for ScoredItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(cmp_rank(self, other))
    }
}

/// Titles of the `num_recommendations` movies most similar to the first movie titled `title`,
/// most similar first. The movie itself is never recommended. Unknown titles result in
/// `Error::TitleNotFound`, which callers can tell apart from an empty list of recommendations.
pub fn recommend<'a>(
    catalog: &'a Catalog,
    title: &str,
    num_recommendations: usize,
) -> Result<Vec<&'a str>> {

    let index = catalog.index_of(title)
        .ok_or_else(|| Error::TitleNotFound(title.to_string()))?;

    let recommendations = similar_items(catalog, index, num_recommendations)
        .into_iter()
        .map(|scored_item| catalog.title(scored_item.item))
        .collect();

    Ok(recommendations)
}

/// The `k` highest scoring other items in the similarity row of `item`, in ranking order.
pub fn similar_items(catalog: &Catalog, item: u32, k: usize) -> Vec<ScoredItem> {

    if k == 0 {
        return Vec::new();
    }

    let mut heap = BinaryHeap::with_capacity(k);

    for (other_item, &score) in catalog.similarities(item).iter().enumerate() {

        let other_item = other_item as u32;

        // Skip the query by index, its score may tie with exact duplicates
        if other_item == item {
            continue;
        }

        let scored_item = ScoredItem { item: other_item, score };

        if heap.len() < k {
            heap.push(scored_item);
        } else if let Some(mut top) = heap.peek_mut() {
            if scored_item < *top {
                *top = scored_item;
            }
        }
    }

    heap.into_sorted_vec()
}
