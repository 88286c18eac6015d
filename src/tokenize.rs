//! Splitting of review text into tokens

use crate::{record::Record, stopwords::StopwordSet};

/// Cleaned token from a review
pub type Token = Box<str>;

/// Split a text into cleaned tokens
///
/// The text is split on single space characters, and each piece is
/// lowercased. Pieces that are empty, lone punctuation (`-` or `.`) or
/// stopwords are then discarded.
///
/// Tabs and other whitespace are not separators. Runs of spaces produce empty
/// pieces, which are filtered out like any other rejected piece.
///
/// The output iterator is lazy and can be cloned to restart iteration.
pub fn tokens<'a>(
    text: &'a str,
    stopwords: &'a StopwordSet,
) -> impl Iterator<Item = Token> + Clone + 'a {
    text.split(' ').filter_map(move |piece| {
        /// Reasons why a piece of text could be discarded
        #[derive(Clone, Copy, Debug, Eq, PartialEq)]
        enum RejectCause {
            /// Nothing between two separators
            Empty,

            /// Punctuation that was separated from the surrounding words
            Punctuation,

            /// Common word that carries little information
            Stopword,
        }

        let token = piece.to_lowercase();
        let rejection = if token.is_empty() {
            Some(RejectCause::Empty)
        } else if token == "-" || token == "." {
            Some(RejectCause::Punctuation)
        } else if stopwords.contains(&token) {
            Some(RejectCause::Stopword)
        } else {
            None
        };

        match rejection {
            Some(cause) => {
                log::trace!("Rejected token {piece:?} ({cause:?})");
                None
            }
            None => Some(token.into()),
        }
    })
}

/// Collect every word from the text of a set of reviews
///
/// Unlike [`tokens()`], this splits on any whitespace, and does not filter
/// anything out. Words are lowercased and kept in table order.
pub fn corpus(records: &[Record]) -> Vec<Token> {
    records
        .iter()
        .flat_map(|record| record.text.split_whitespace())
        .map(|word| word.to_lowercase().into())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn the() -> StopwordSet {
        ["the"].into_iter().collect()
    }

    fn collect(text: &str, stopwords: &StopwordSet) -> Vec<Token> {
        tokens(text, stopwords).collect()
    }

    #[test]
    fn quick_brown_fox() {
        assert_eq!(
            collect("the quick brown fox the quick", &the()),
            ["quick", "brown", "fox", "quick"].map(Token::from)
        );
    }

    #[test]
    fn empty_text() {
        assert!(collect("", &StopwordSet::english()).is_empty());
    }

    #[test]
    fn filtering() {
        assert_eq!(
            collect("The  Fox - jumps . over  ", &the()),
            ["fox", "jumps", "over"].map(Token::from)
        );
    }

    #[test]
    fn only_spaces_are_separators() {
        assert_eq!(
            collect("quick\tbrown fox\n", &StopwordSet::new()),
            ["quick\tbrown", "fox\n"].map(Token::from)
        );
    }

    #[test]
    fn restartable() {
        let stopwords = the();
        let tokens = tokens("the Lazy dog", &stopwords);
        assert_eq!(tokens.clone().count(), 2);
        assert_eq!(tokens.collect::<Vec<_>>(), ["lazy", "dog"].map(Token::from));
    }

    #[test]
    fn idempotent() {
        let stopwords = StopwordSet::english();
        let text = "I bought THIS  blender - it is . great and it Works";
        let first = collect(text, &stopwords);
        let second = collect(&first.join(" "), &stopwords);
        assert_eq!(first, second);
    }

    #[test]
    fn corpus_keeps_everything() {
        let records = [
            Record::new("The  quick\tfox"),
            Record::new(""),
            Record::new("- Done."),
        ];
        assert_eq!(
            corpus(&records),
            ["the", "quick", "fox", "-", "done."].map(Token::from)
        );
    }
}
