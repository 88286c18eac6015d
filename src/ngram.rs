//! Extraction of n-grams from token sequences

use crate::{stopwords::StopwordSet, tokenize, Ngram, Result};
use anyhow::Context;
use std::num::NonZeroUsize;

/// Check that an n-gram order is usable
pub fn check_order(n: usize) -> Result<NonZeroUsize> {
    NonZeroUsize::new(n).with_context(|| format!("n-gram order must be at least 1, got {n}"))
}

/// Enumerate the n-grams of a token sequence, in order of appearance
///
/// Each n-gram is made of `order` consecutive tokens joined by a single space.
/// A sequence with less than `order` tokens has no n-gram.
fn ngrams<'tokens>(
    tokens: &'tokens [Box<str>],
    order: NonZeroUsize,
) -> impl Iterator<Item = Ngram> + 'tokens {
    tokens
        .windows(order.get())
        .map(|window| window.join(" ").into_boxed_str())
}

/// Tokenize a text and list its n-grams, in order of appearance
pub fn generate_ngrams(text: &str, stopwords: &StopwordSet, order: NonZeroUsize) -> Vec<Ngram> {
    let tokens = tokenize::tokens(text, stopwords).collect::<Vec<_>>();
    ngrams(&tokens, order).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOX: &str = "the quick brown fox the quick";

    fn the() -> StopwordSet {
        ["the"].into_iter().collect()
    }

    fn generate(text: &str, stopwords: &StopwordSet, n: usize) -> Vec<Ngram> {
        generate_ngrams(text, stopwords, check_order(n).unwrap())
    }

    #[test]
    fn unigrams() {
        assert_eq!(
            generate(FOX, &the(), 1),
            ["quick", "brown", "fox", "quick"].map(Ngram::from)
        );
    }

    #[test]
    fn bigrams() {
        assert_eq!(
            generate(FOX, &the(), 2),
            ["quick brown", "brown fox", "fox quick"].map(Ngram::from)
        );
    }

    #[test]
    fn too_few_tokens() {
        assert!(generate(FOX, &the(), 5).is_empty());
        for n in 1..4 {
            assert!(generate("", &the(), n).is_empty());
        }
    }

    #[test]
    fn zero_order() {
        assert!(check_order(0).is_err());
        assert_eq!(check_order(3).unwrap().get(), 3);
    }

    #[test]
    fn ngram_count() {
        let stopwords = StopwordSet::english();
        for text in [
            "",
            "great",
            "the blender broke after two weeks",
            "Terrible . service , never - again and never again",
        ] {
            let token_count = tokenize::tokens(text, &stopwords).count();
            for n in 1..=6 {
                assert_eq!(
                    generate(text, &stopwords, n).len(),
                    (token_count + 1).saturating_sub(n),
                    "n-gram count mismatch for {text:?} with n = {n}"
                );
            }
        }
    }
}
