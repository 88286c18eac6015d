//! This program inspects a table of customer reviews, with the columns `date`,
//! `title`, `text`, `url` and `stars`, and finds out which word sequences come
//! up most often in the review texts.

mod chart;
mod config;
mod load;
mod ngram;
mod progress;
mod record;
mod stats;
mod stopwords;
mod tokenize;
mod top;

use crate::{
    config::{Config, Output},
    progress::ProgressReport,
};
use clap::{Parser, Subcommand};
use dialoguer::FuzzySelect;
use log::LevelFilter;
use std::{num::NonZeroUsize, path::PathBuf};
use tokio::io::{AsyncWriteExt, BufWriter, Stdout};

/// Inspect a table of customer reviews and rank the most frequent n-grams
/// from the review texts
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Review table, as a path or an HTTP(S) URL
    ///
    /// The table is parsed as CSV with a header row, or as TSV if the name ends
    /// with ".tsv". Names ending with ".gz" are decompressed first. Only the
    /// "text" column is mandatory.
    #[arg(short, long, global = true, default_value = "reviews.csv")]
    input: Box<str>,

    /// Operation to be performed
    #[command(subcommand)]
    command: Command,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        if let Command::Top(top) = &args.command {
            anyhow::ensure!(
                !top.bar.is_whitespace() && !top.bar.is_control(),
                "bar character {:?} would not be visible",
                top.bar
            );
        }
        Ok(args)
    }
}

/// Operations on the review table
#[derive(Subcommand, Debug)]
enum Command {
    /// Display every field of a review
    Show {
        /// Position of the review in the table, starting from 0
        ///
        /// Will interactively prompt for a review if not specified.
        index: Option<usize>,
    },

    /// Extract the company name from review URLs
    ///
    /// This does not read the review table.
    Company {
        /// Review URLs
        #[arg(required = true)]
        urls: Vec<Box<str>>,
    },

    /// Convert star ratings like "star-rating star-rating-4" to numbers
    ///
    /// This does not read the review table.
    Rating {
        /// Star ratings
        #[arg(required = true)]
        stars: Vec<Box<str>>,
    },

    /// List every word of every review text, in lowercase
    Corpus,

    /// Rank the most frequent n-grams from the review texts
    Top(TopArgs),
}

/// N-gram ranking options
#[derive(clap::Args, Debug)]
pub struct TopArgs {
    /// Number of consecutive words in each n-gram
    #[arg(short = 'n', long, default_value = "1")]
    order: NonZeroUsize,

    /// Number of n-grams to display
    ///
    /// Equally frequent n-grams are ranked by order of first appearance in the
    /// review table.
    #[arg(short = 'k', long, default_value = "20")]
    top_k: usize,

    /// File with extra stopwords, one per line
    ///
    /// Stopwords are common words which are ignored during the analysis
    /// because they carry little information. Lines starting with "#" are
    /// ignored.
    #[arg(long)]
    stopwords: Option<PathBuf>,

    /// Do not ignore common English words
    ///
    /// By default, the English stopword list from the NLTK project is used.
    #[arg(long, default_value_t = false)]
    no_default_stopwords: bool,

    /// Length of the longest bar of the chart, in terminal columns
    #[arg(short, long, default_value = "50")]
    width: NonZeroUsize,

    /// Character used to draw bars
    #[arg(short, long, default_value = "█")]
    bar: char,

    /// Print tab-separated n-grams and counts instead of a chart
    #[arg(long, default_value_t = false)]
    tsv: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    setup_logging().map_err(|e| anyhow::format_err!("{e}"))?;

    // Decode CLI arguments
    let Args { input, command } = Args::parse_and_check()?;

    // Set up progress reporting
    let report = ProgressReport::new();

    let mut stdout = BufWriter::new(tokio::io::stdout());
    match command {
        Command::Show { index } => {
            let records = load::load(&input, &report).await?;
            let record = match index {
                Some(index) => record::get(&records, index)?,
                None => prompt(&records)?,
            };
            write_line(&mut stdout, &record.to_string()).await?;
        }
        Command::Company { urls } => {
            for url in urls.iter() {
                write_line(&mut stdout, record::company(url)).await?;
            }
        }
        Command::Rating { stars } => {
            for stars in stars.iter() {
                let rating = record::rating(stars)?;
                write_line(&mut stdout, &rating.to_string()).await?;
            }
        }
        Command::Corpus => {
            let records = load::load(&input, &report).await?;
            for word in tokenize::corpus(&records) {
                write_line(&mut stdout, &word).await?;
            }
        }
        Command::Top(args) => {
            let config = Config::new(args).await?;
            let records = load::load(&input, &report).await?;
            let table =
                stats::count_ngrams(&records, &config.stopwords, config.order.get(), &report)?;
            if table.is_empty() {
                log::info!("No {}-gram found in {input}", config.order);
            }
            let ranking = top::pick_top_ngrams(table, config.top_k);
            match config.output {
                Output::Chart(style) => {
                    stdout
                        .write_all(chart::render(&ranking, style).as_bytes())
                        .await?;
                }
                Output::Tsv => {
                    for (ngram, count) in ranking {
                        write_line(&mut stdout, &format!("{ngram}\t{count}")).await?;
                    }
                }
            }
        }
    }
    stdout.flush().await?;
    Ok(())
}

/// Ask the user to select a review
fn prompt(records: &[record::Record]) -> Result<&record::Record> {
    anyhow::ensure!(!records.is_empty(), "the review table is empty");
    let summaries = records
        .iter()
        .enumerate()
        .map(|(idx, record)| format!("#{idx}: {}", record.summary()))
        .collect::<Vec<_>>();
    let idx = FuzzySelect::new()
        .with_prompt("Which review should I display?")
        .items(&summaries)
        .default(0)
        .max_length(usize::MAX)
        .interact()?;
    record::get(records, idx)
}

/// Write a line of text to stdout
async fn write_line(stdout: &mut BufWriter<Stdout>, line: &str) -> Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Space-separated sequence of tokens
pub type Ngram = Box<str>;

/// Addition operator for NonZeroUsize
pub fn add_nz_usize(x: NonZeroUsize, y: NonZeroUsize) -> NonZeroUsize {
    x.checked_add(y.get())
        .expect("overflow while adding NonZeroUsizes")
}

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn top_defaults() {
        let args = Args::try_parse_from(["review-ngrams", "top"]).unwrap();
        assert_eq!(&*args.input, "reviews.csv");
        let top = match args.command {
            Command::Top(top) => top,
            other => panic!("expected the top command, got {other:?}"),
        };
        assert_eq!(top.order.get(), 1);
        assert_eq!(top.top_k, 20);
        assert_eq!(top.width.get(), 50);
        assert_eq!(top.bar, '█');
        assert!(top.stopwords.is_none());
        assert!(!top.no_default_stopwords);
        assert!(!top.tsv);
    }

    #[test]
    fn top_options() {
        let args = Args::try_parse_from([
            "review-ngrams",
            "top",
            "-n",
            "3",
            "-k",
            "0",
            "--tsv",
            "--input",
            "https://example.org/reviews.csv.gz",
        ])
        .unwrap();
        assert_eq!(&*args.input, "https://example.org/reviews.csv.gz");
        let top = match args.command {
            Command::Top(top) => top,
            other => panic!("expected the top command, got {other:?}"),
        };
        assert_eq!(top.order.get(), 3);
        assert_eq!(top.top_k, 0);
        assert!(top.tsv);
    }

    #[test]
    fn zero_order_is_rejected() {
        assert!(Args::try_parse_from(["review-ngrams", "top", "-n", "0"]).is_err());
    }

    #[test]
    fn helpers_need_arguments() {
        assert!(Args::try_parse_from(["review-ngrams", "company"]).is_err());
        assert!(Args::try_parse_from(["review-ngrams", "rating"]).is_err());
        assert!(Args::try_parse_from(["review-ngrams", "show"]).is_ok());
    }
}
