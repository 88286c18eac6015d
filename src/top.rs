//! Select the most frequent n-grams from a frequency table

use crate::{
    stats::{FrequencyTable, NgramStats},
    Ngram,
};
use rayon::prelude::*;
use std::{
    cmp::Reverse,
    collections::{BinaryHeap, VecDeque},
};

/// N-gram and its number of occurences
pub type RankedNgram = (Ngram, usize);

/// Pick the `top_k` most frequent n-grams, by order of decreasing frequency
///
/// Equally frequent n-grams are ordered by first appearance in the reviews.
pub fn pick_top_ngrams(table: FrequencyTable, top_k: usize) -> Vec<RankedNgram> {
    // If every ngram is kept, just sort the whole table
    if top_k >= table.len() {
        let mut sorted = table.into_par_iter().collect::<Vec<_>>();
        sorted.par_sort_unstable_by_key(|(_ngram, stats)| Reverse(*stats));
        return (sorted.into_par_iter())
            .map(|(ngram, stats)| (ngram, stats.count()))
            .collect();
    }

    // Otherwise, find the top ngrams up to this limit
    let mut top_stats_and_ngrams = (table.into_par_iter())
        .map(|(ngram, stats)| (Reverse(stats), ngram))
        // First determine top ngrams on each thread using a min-heap...
        .fold(
            || BinaryHeap::with_capacity(top_k + 1),
            |mut heap, (rev_stats, ngram)| {
                push_bounded(&mut heap, (rev_stats, ngram), top_k);
                heap
            },
        )
        // ...then merge thread results into a global result
        .reduce(BinaryHeap::new, |heap1, heap2| {
            let (mut dst, mut src) = if heap1.len() >= heap2.len() {
                (heap1, heap2)
            } else {
                (heap2, heap1)
            };
            while let Some(elem) = src.pop() {
                push_bounded(&mut dst, elem, top_k);
            }
            dst
        });

    // Collect the results in order of decreasing popularity. This requires an
    // order reversal since we used a min-heap.
    let mut result = VecDeque::with_capacity(top_stats_and_ngrams.len());
    while let Some((Reverse(stats), ngram)) = top_stats_and_ngrams.pop() {
        result.push_front((ngram, stats.count()));
    }
    result.into()
}

/// Insert into a min-heap, evicting the least frequent ngram if the heap grows
/// beyond `max_len` elements
fn push_bounded(
    heap: &mut BinaryHeap<(Reverse<NgramStats>, Ngram)>,
    elem: (Reverse<NgramStats>, Ngram),
    max_len: usize,
) {
    heap.push(elem);
    if heap.len() > max_len {
        heap.pop();
    }
}
