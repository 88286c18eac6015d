//! N-gram frequency statistics

use crate::{
    add_nz_usize,
    ngram::{self, check_order},
    progress::{ProgressConfig, ProgressReport, Work},
    record::Record,
    stopwords::StopwordSet,
    Ngram, Result,
};
use rayon::prelude::*;
use std::{
    cmp::Ordering,
    collections::{hash_map, HashMap},
    num::NonZeroUsize,
};

/// Count the n-grams of order `n` across the text of a set of reviews
///
/// Reviews are tokenized and counted independently in parallel, and the
/// partial results are then merged. Repeated n-grams within a review are
/// counted every time they appear.
pub fn count_ngrams(
    records: &[Record],
    stopwords: &StopwordSet,
    n: usize,
    report: &ProgressReport,
) -> Result<FrequencyTable> {
    let order = check_order(n)?;
    let progress = report.add(
        "Counting n-grams",
        ProgressConfig::new(Work::PercentSteps(records.len())),
    );
    let table = (records.par_iter().enumerate())
        .fold(FrequencyTable::new, |mut table, (record_idx, record)| {
            table.add_text(record_idx, &record.text, stopwords, order);
            progress.make_progress(1);
            table
        })
        .reduce(FrequencyTable::new, |table1, table2| {
            let (mut dst, src) = if table1.len() >= table2.len() {
                (table1, table2)
            } else {
                (table2, table1)
            };
            dst.merge(src);
            dst
        });
    log::debug!(
        "Found {} distinct {n}-grams across {} reviews",
        table.len(),
        records.len()
    );
    Ok(table)
}

/// Number of occurences of each n-gram across a set of reviews
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FrequencyTable(HashMap<Ngram, NgramStats>);
//
impl FrequencyTable {
    /// Set up an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the n-grams from the text of one review
    ///
    /// `record_idx` is the position of the review within its table, which is
    /// used to rank equally frequent n-grams by order of first appearance.
    pub fn add_text(
        &mut self,
        record_idx: usize,
        text: &str,
        stopwords: &StopwordSet,
        order: NonZeroUsize,
    ) {
        let ngrams = ngram::generate_ngrams(text, stopwords, order);
        for (window_idx, ngram) in ngrams.into_iter().enumerate() {
            let position = Position {
                record: record_idx,
                window: window_idx,
            };
            match self.0.entry(ngram) {
                hash_map::Entry::Occupied(o) => o.into_mut().add_occurence(position),
                hash_map::Entry::Vacant(v) => {
                    log::trace!("First occurence of {:?} at {position:?}", v.key());
                    v.insert(NgramStats::new(position));
                }
            }
        }
    }

    /// Merge counts from another set of reviews
    pub fn merge(&mut self, other: Self) {
        for (ngram, stats) in other.0 {
            match self.0.entry(ngram) {
                hash_map::Entry::Occupied(o) => o.into_mut().merge(stats),
                hash_map::Entry::Vacant(v) => {
                    v.insert(stats);
                }
            }
        }
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that no n-gram was seen
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
//
impl IntoParallelIterator for FrequencyTable {
    type Item = (Ngram, NgramStats);
    type Iter = rayon::collections::hash_map::IntoIter<Ngram, NgramStats>;

    fn into_par_iter(self) -> Self::Iter {
        self.0.into_par_iter()
    }
}

/// Location of an n-gram within a set of reviews
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Position {
    /// Index of the review within the table
    record: usize,

    /// Index of the n-gram within the review's n-grams
    window: usize,
}

/// Cumulative knowledge about an n-gram
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NgramStats {
    /// Number of occurences
    count: NonZeroUsize,

    /// Earliest occurence
    first_seen: Position,
}
//
impl NgramStats {
    /// Set up statistics from a first occurence
    fn new(position: Position) -> Self {
        Self {
            count: NonZeroUsize::MIN,
            first_seen: position,
        }
    }

    /// Record another occurence
    fn add_occurence(&mut self, position: Position) {
        self.count = add_nz_usize(self.count, NonZeroUsize::MIN);
        self.first_seen = self.first_seen.min(position);
    }

    /// Merge statistics for the same n-gram from a different set of reviews
    fn merge(&mut self, rhs: NgramStats) {
        self.count = add_nz_usize(self.count, rhs.count);
        self.first_seen = self.first_seen.min(rhs.first_seen);
    }

    /// Number of occurences
    pub fn count(&self) -> usize {
        self.count.get()
    }
}
//
/// More frequent n-grams compare greater, and among equally frequent n-grams,
/// the one that was seen first compares greater.
impl Ord for NgramStats {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.count.cmp(&other.count) {
            Ordering::Greater => return Ordering::Greater,
            Ordering::Less => return Ordering::Less,
            Ordering::Equal => {}
        }
        other.first_seen.cmp(&self.first_seen)
    }
}
//
impl PartialOrd for NgramStats {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
