//! Stopword sets used to filter low-information tokens

use crate::Result;
use anyhow::Context;
use std::{collections::HashSet, path::Path, sync::OnceLock};

/// Set of words that should be ignored during n-gram analysis
///
/// Words are stored in lowercase form, and lookups are expected to be
/// performed with lowercase tokens, which makes matching case-insensitive.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StopwordSet(HashSet<Box<str>>);
//
impl StopwordSet {
    /// Empty stopword set, which filters nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Common English stopwords
    pub fn english() -> Self {
        english_stopwords().iter().copied().collect()
    }

    /// Add a stopword
    pub fn insert(&mut self, word: &str) {
        self.0.insert(word.to_lowercase().into());
    }

    /// Add stopwords from a list with one word per line
    ///
    /// Surrounding whitespace is ignored, as are blank lines and lines starting
    /// with `#`.
    pub fn extend_from_lines(&mut self, lines: &str) {
        for word in lines.lines().map(str::trim) {
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            self.insert(word);
        }
    }

    /// Add stopwords from a file with one word per line
    pub async fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let lines = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading stopwords from {}", path.display()))?;
        let old_len = self.len();
        self.extend_from_lines(&lines);
        log::debug!(
            "Loaded {} new stopwords from {}",
            self.len() - old_len,
            path.display()
        );
        Ok(())
    }

    /// Truth that a lowercase token is a stopword
    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    /// Number of stopwords in the set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Truth that the set contains no stopword
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
//
impl<'word> FromIterator<&'word str> for StopwordSet {
    fn from_iter<I: IntoIterator<Item = &'word str>>(iter: I) -> Self {
        let mut result = Self::new();
        for word in iter {
            result.insert(word);
        }
        result
    }
}

/// English stopword list of the NLTK project
fn english_stopwords() -> &'static [&'static str] {
    static LAZY: OnceLock<Box<[&'static str]>> = OnceLock::new();
    LAZY.get_or_init(|| {
        "i me my myself we our ours ourselves you you're you've you'll you'd your \
         yours yourself yourselves he him his himself she she's her hers herself it \
         it's its itself they them their theirs themselves what which who whom this \
         that that'll these those am is are was were be been being have has had \
         having do does did doing a an the and but if or because as until while of \
         at by for with about against between into through during before after \
         above below to from up down in out on off over under again further then \
         once here there when where why how all any both each few more most other \
         some such no nor not only own same so than too very s t can will just don \
         don't should should've now d ll m o re ve y ain aren aren't couldn \
         couldn't didn didn't doesn doesn't hadn hadn't hasn hasn't haven haven't \
         isn isn't ma mightn mightn't mustn mustn't needn needn't shan shan't \
         shouldn shouldn't wasn wasn't weren weren't won won't wouldn wouldn't"
            .split_whitespace()
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_list() {
        let english = StopwordSet::english();
        assert_eq!(english.len(), 179);
        for word in ["the", "and", "don't", "yourselves", "wouldn't"] {
            assert!(english.contains(word), "{word} should be a stopword");
        }
        for word in ["quick", "fox", "review"] {
            assert!(!english.contains(word), "{word} should not be a stopword");
        }
    }

    #[test]
    fn insertion_is_case_insensitive() {
        let mut stopwords = StopwordSet::new();
        assert!(stopwords.is_empty());
        stopwords.insert("ThE");
        assert!(stopwords.contains("the"));
        assert_eq!(stopwords.len(), 1);
    }

    #[test]
    fn line_lists() {
        let mut stopwords = StopwordSet::new();
        stopwords.extend_from_lines("  Great \n\n# a comment\nproduct\r\ngreat\n");
        assert_eq!(stopwords.len(), 2);
        assert!(stopwords.contains("great"));
        assert!(stopwords.contains("product"));
        assert!(!stopwords.contains("# a comment"));
    }
}
