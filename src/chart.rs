//! Terminal rendering of the most frequent n-grams

use crate::top::RankedNgram;
use std::{fmt::Write, num::NonZeroUsize};

/// Label of the axis that lists n-grams
const NGRAM_AXIS: &str = "Ngram";

/// Label of the axis that measures occurence counts
const COUNT_AXIS: &str = "Occurrences";

/// Appearance of the bar chart
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ChartStyle {
    /// Length of the longest bar, in terminal columns
    pub width: NonZeroUsize,

    /// Character that bars are drawn with
    pub bar: char,
}

/// Draw ranked n-grams as a horizontal bar chart, first n-gram on top
///
/// Bars are scaled so that the largest count spans the full chart width, and
/// any nonzero count gets at least one bar character.
pub fn render(ranking: &[RankedNgram], style: ChartStyle) -> String {
    let label_width = (ranking.iter())
        .map(|(ngram, _count)| ngram.chars().count())
        .chain(std::iter::once(NGRAM_AXIS.len()))
        .max()
        .unwrap_or_default();
    let max_count = (ranking.iter())
        .map(|(_ngram, count)| *count)
        .max()
        .unwrap_or_default();
    let width = style.width.get();

    let mut chart = String::new();
    // Writing into a String cannot fail
    let _ = writeln!(chart, "{NGRAM_AXIS:>label_width$}");
    for (ngram, count) in ranking {
        let bar_len = (count * width).div_ceil(max_count);
        let bar = std::iter::repeat(style.bar)
            .take(bar_len)
            .collect::<String>();
        let _ = writeln!(chart, "{ngram:>label_width$} | {bar} {count}");
    }
    let _ = writeln!(chart, "{:label_width$} +{}", "", "-".repeat(width + 1));
    let _ = writeln!(chart, "{:label_width$}   {COUNT_AXIS}", "");
    chart
}
