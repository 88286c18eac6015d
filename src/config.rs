//! N-gram ranking configuration

use crate::{chart::ChartStyle, stopwords::StopwordSet, Result, TopArgs};
use std::{num::NonZeroUsize, sync::Arc};

/// Final configuration of the `top` command
///
/// This is the result of combining digested [`TopArgs`] with the stopword
/// files that they point to. Please refer to [`TopArgs`] to know more about
/// common fields.
#[allow(missing_docs)]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Words to be ignored during tokenization
    pub stopwords: StopwordSet,

    /// How the ranking should be displayed
    pub output: Output,

    // Other fields have the same meaning as in TopArgs
    pub order: NonZeroUsize,
    pub top_k: usize,
}
//
impl Config {
    /// Determine configuration from CLI arguments
    pub async fn new(args: TopArgs) -> Result<Arc<Self>> {
        let TopArgs {
            order,
            top_k,
            stopwords: stopwords_file,
            no_default_stopwords,
            width,
            bar,
            tsv,
        } = args;
        let mut stopwords = if no_default_stopwords {
            StopwordSet::new()
        } else {
            StopwordSet::english()
        };
        if let Some(path) = stopwords_file {
            stopwords.extend_from_file(&path).await?;
        }
        if stopwords.is_empty() {
            log::debug!("No stopwords configured, every token will be kept");
        }
        let output = if tsv {
            Output::Tsv
        } else {
            Output::Chart(ChartStyle { width, bar })
        };
        Ok(Arc::new(Self {
            stopwords,
            output,
            order,
            top_k,
        }))
    }
}

/// Display format of the n-gram ranking
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Output {
    /// Horizontal bar chart
    Chart(ChartStyle),

    /// One `ngram<TAB>count` line per n-gram
    Tsv,
}
