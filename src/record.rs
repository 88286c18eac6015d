//! Reviews from the input table and normalization of their noisy fields

use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::fmt::{self, Display, Formatter};

/// Review from the input table
///
/// Only the text column is mandatory. Other columns may be missing from the
/// table, or left empty on some rows.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq)]
pub struct Record {
    /// Publication date, as written in the table
    #[serde(default)]
    pub date: Option<Box<str>>,

    /// Review title
    #[serde(default)]
    pub title: Option<Box<str>>,

    /// Review body, which n-gram analysis operates on
    pub text: Box<str>,

    /// Address of the review page, which identifies the reviewed company
    #[serde(default)]
    pub url: Option<Box<str>>,

    /// Star rating, as written in the table (e.g. "star-rating star-rating-4")
    #[serde(default)]
    pub stars: Option<Box<str>>,
}
//
impl Record {
    /// Review that only has a text
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Short human-readable description of the review
    pub fn summary(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => self.text.lines().next().unwrap_or_default(),
        }
    }
}
//
/// Multi-line display of every field, one per line
impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let field = |value: &Option<Box<str>>| value.as_deref().unwrap_or_default().to_owned();
        writeln!(f, "Date: {}", field(&self.date))?;
        writeln!(f, "Title: {}", field(&self.title))?;
        writeln!(f, "Text: {}", self.text)?;
        writeln!(f, "URL: {}", field(&self.url))?;
        write!(f, "Stars: {}", field(&self.stars))
    }
}

/// Look up a review by position in the table
pub fn get(records: &[Record], index: usize) -> Result<&Record> {
    records.get(index).with_context(|| {
        format!(
            "requested review #{index}, but the table only has {} reviews",
            records.len()
        )
    })
}

/// Identify the company that a review URL is about
///
/// This is the last path segment of the URL, without the query string.
pub fn company(url: &str) -> &str {
    let last_segment = url.rsplit('/').next().unwrap_or(url);
    last_segment.split('?').next().unwrap_or(last_segment)
}

/// Extract the numerical value of a star rating
///
/// The rating is expected to look like "star-rating star-rating-4": the value
/// is found at the end of the second word, after the last dash.
pub fn rating(stars: &str) -> Result<f32> {
    let word = stars
        .split_whitespace()
        .nth(1)
        .with_context(|| format!("star rating {stars:?} should have at least two words"))?;
    let value = word.rsplit('-').next().unwrap_or(word);
    value
        .parse::<f32>()
        .with_context(|| format!("star rating {stars:?} does not end with a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review() -> Record {
        Record {
            date: Some("2023-01-14".into()),
            title: Some("Fast shipping".into()),
            text: "Arrived the next day.".into(),
            url: Some("https://www.trustpilot.com/review/www.acme.com?page=3".into()),
            stars: Some("star-rating star-rating-5".into()),
        }
    }

    #[test]
    fn pretty_print() {
        assert_eq!(
            review().to_string(),
            "Date: 2023-01-14\n\
             Title: Fast shipping\n\
             Text: Arrived the next day.\n\
             URL: https://www.trustpilot.com/review/www.acme.com?page=3\n\
             Stars: star-rating star-rating-5"
        );
        assert_eq!(
            Record::new("Meh").to_string(),
            "Date: \nTitle: \nText: Meh\nURL: \nStars: "
        );
    }

    #[test]
    fn summary() {
        assert_eq!(review().summary(), "Fast shipping");
        assert_eq!(Record::new("First line\nSecond line").summary(), "First line");
        assert_eq!(Record::new("").summary(), "");
    }

    #[test]
    fn lookup() {
        let records = [review(), Record::new("other")];
        assert_eq!(get(&records, 1).unwrap().text.as_ref(), "other");
        assert!(get(&records, 2).is_err());
        assert!(get(&[], 0).is_err());
    }

    #[test]
    fn companies() {
        assert_eq!(company(review().url.as_deref().unwrap()), "www.acme.com");
        assert_eq!(company("https://example.org/review/shop.example"), "shop.example");
        assert_eq!(company("acme.com?utm=x"), "acme.com");
        assert_eq!(company("https://example.org/review/"), "");
        assert_eq!(company(""), "");
    }

    #[test]
    fn ratings() {
        assert_eq!(rating("star-rating star-rating-4").unwrap(), 4.0);
        assert_eq!(rating("  star-rating   star-rating-1 extra").unwrap(), 1.0);
        assert_eq!(rating("Rated 4.5").unwrap(), 4.5);
        assert!(rating("star-rating").is_err());
        assert!(rating("").is_err());
        assert!(rating("star-rating star-rating-five").is_err());
    }
}
