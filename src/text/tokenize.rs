//! Token filtering and normalization.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use super::lemma::Lemmatizer;
use super::stopwords;
use crate::item::TermCounts;

const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Characters replaced by a space before splitting.
const FILTER_CHARS: [char; 11] = [
    '.', ',', ';', '%', '(', ')', '[', ']', '\u{a0}', '\u{2009}', '\u{200a}',
];

/// Greek letters and sub/superscripts folded to a common ASCII form.
const REPLACEMENTS: [(char, char); 34] = [
    ('α', 'a'),
    ('β', 'B'),
    ('₀', '0'),
    ('₁', '1'),
    ('₂', '2'),
    ('₃', '3'),
    ('₄', '4'),
    ('₅', '5'),
    ('₆', '6'),
    ('₇', '7'),
    ('₈', '8'),
    ('₉', '9'),
    ('₍', '('),
    ('₎', ')'),
    ('₊', '+'),
    ('₋', '-'),
    ('₌', '='),
    ('⁰', '0'),
    ('¹', '1'),
    ('²', '2'),
    ('³', '3'),
    ('⁴', '4'),
    ('⁵', '5'),
    ('⁶', '6'),
    ('⁷', '7'),
    ('⁸', '8'),
    ('⁹', '9'),
    ('⁺', '+'),
    ('⁻', '-'),
    ('⁼', '='),
    ('⁽', '('),
    ('⁾', ')'),
    ('ⁱ', 'i'),
    ('ⁿ', 'n'),
];

/// Extracts terms from a single whitespace-delimited token.
#[derive(Clone)]
pub struct TokenProcessor {
    stop_words: HashSet<String>,
    lemmatizer: Option<Arc<dyn Lemmatizer>>,
    min_token_length: usize,
}

impl fmt::Debug for TokenProcessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenProcessor")
            .field("stop_words", &self.stop_words.len())
            .field("lemmatizer", &self.lemmatizer.is_some())
            .field("min_token_length", &self.min_token_length)
            .finish()
    }
}

impl Default for TokenProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenProcessor {
    /// Create a processor with the [`stopwords::ENGLISH`] list and no
    /// lemmatizer.
    pub fn new() -> Self {
        Self {
            stop_words: stopwords::ENGLISH.iter().map(|w| w.to_string()).collect(),
            lemmatizer: None,
            min_token_length: DEFAULT_MIN_TOKEN_LENGTH,
        }
    }

    /// Replace the common words to drop (matched against the lower-cased
    /// token). Pass an empty list to keep every word.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Set the lemmatizer.
    pub fn with_lemmatizer(mut self, lemmatizer: impl Lemmatizer + 'static) -> Self {
        self.lemmatizer = Some(Arc::new(lemmatizer));
        self
    }

    /// Set the minimum token length, in characters.
    pub fn with_min_token_length(mut self, len: usize) -> Self {
        self.min_token_length = len;
        self
    }

    /// Terms found in `token`.
    ///
    /// Acronyms and mixed-case tokens are kept verbatim and lower-cased, even
    /// when the lower-cased form is a stop word. Everything else is kept
    /// lower-cased unless it is a stop word. A differing lemma is counted too.
    pub fn extract(&self, token: &str) -> TermCounts {
        let mut terms = TermCounts::new();

        for token in split(token) {
            if token.chars().count() < self.min_token_length
                || is_numeric(&token)
                || is_date_like(&token)
            {
                continue;
            }

            let lower = token.to_lowercase();
            let lemma = self
                .lemmatizer
                .as_ref()
                .map(|l| l.lemmatize(&lower))
                .filter(|lemma| *lemma != lower);

            if is_capitalization_idiomatic(&token) {
                terms.increment(token.clone());
            } else if self.stop_words.contains(&lower) {
                continue;
            }
            terms.increment(lower);
            if let Some(lemma) = lemma {
                terms.increment(lemma);
            }
        }

        terms
    }
}

/// Normalize and split a raw token into candidate terms.
///
/// Dashed text also contributes each dash-separated part.
fn split(raw: &str) -> Vec<String> {
    let s: String = raw
        .chars()
        .map(|c| {
            if FILTER_CHARS.contains(&c) {
                ' '
            } else {
                REPLACEMENTS
                    .iter()
                    .find(|(from, _)| *from == c)
                    .map_or(c, |&(_, to)| to)
            }
        })
        .collect();

    let mut tokens: Vec<String> = s.split(' ').map(|w| w.trim().to_string()).collect();
    if s.contains('-') {
        tokens.extend(
            s.split('-')
                .map(str::trim)
                .filter(|w| !w.is_empty())
                .map(str::to_string),
        );
    }
    tokens
}

fn is_numeric(s: &str) -> bool {
    s.parse::<f64>().is_ok()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn is_date_like(s: &str) -> bool {
    if s.contains('/') {
        s.split('/').all(is_all_digits)
    } else if s.contains('-') && s.matches('-').count() < 3 {
        s.split('-').all(is_all_digits)
    } else {
        false
    }
}

/// At least one cased character, and every cased character upper-case.
fn is_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        cased |= c.is_uppercase();
    }
    cased
}

/// At least one cased character, and every cased character lower-case.
fn is_lower(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        cased |= c.is_lowercase();
    }
    cased
}

/// Acronym (`DNA`) or mixed case past the first letter (`mRNA`, `BRCA1a`).
fn is_capitalization_idiomatic(s: &str) -> bool {
    let tail = s.char_indices().nth(1).map_or("", |(i, _)| &s[i..]);
    is_upper(s) || !is_lower(tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plural_lemma(word: &str) -> String {
        word.strip_suffix('s').unwrap_or(word).to_string()
    }

    #[test]
    fn test_capitalized_word_is_lowered() {
        let terms = TokenProcessor::new().extract("Turner");
        assert_eq!(terms.get("turner"), 1);
        assert_eq!(terms.get("Turner"), 0);
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_acronym_kept_verbatim_and_lowered() {
        let processor = TokenProcessor::new().with_stop_words(["dna"]);
        let terms = processor.extract("DNA");
        assert_eq!(terms.get("DNA"), 1);
        assert_eq!(terms.get("dna"), 1);
    }

    #[test]
    fn test_mixed_case() {
        let terms = TokenProcessor::new().extract("mRNA");
        assert_eq!(terms.get("mRNA"), 1);
        assert_eq!(terms.get("mrna"), 1);
    }

    #[test]
    fn test_punctuation_is_stripped() {
        let terms = TokenProcessor::new().extract("(aorta).");
        assert_eq!(terms.get("aorta"), 1);
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_dashed_token_adds_parts() {
        let processor = TokenProcessor::new().with_stop_words(["related"]);
        let terms = processor.extract("syndrome-related");
        assert_eq!(terms.get("syndrome-related"), 1);
        assert_eq!(terms.get("syndrome"), 1);
        assert_eq!(terms.get("related"), 0);
    }

    #[test]
    fn test_greek_letters_folded() {
        let terms = TokenProcessor::new().extract("α-helix");
        assert_eq!(terms.get("a-helix"), 1);
        assert_eq!(terms.get("helix"), 1);
    }

    #[test]
    fn test_stop_words_dropped() {
        let processor = TokenProcessor::new().with_stop_words(["girls"]);
        assert!(processor.extract("Girls").is_empty());
    }

    #[test]
    fn test_lemma_counted_when_different() {
        let processor = TokenProcessor::new().with_lemmatizer(plural_lemma);
        let terms = processor.extract("Livebirths");
        assert_eq!(terms.get("livebirths"), 1);
        assert_eq!(terms.get("livebirth"), 1);

        let terms = processor.extract("cohort");
        assert_eq!(terms.len(), 1);
    }

    #[test]
    fn test_min_token_length() {
        let processor = TokenProcessor::new().with_min_token_length(5);
        assert!(processor.extract("aorta").contains("aorta"));
        assert!(processor.extract("arch").is_empty());
    }

    #[test]
    fn test_numeric_and_dates() {
        assert!(is_numeric("12.6"));
        assert!(is_numeric("1e5"));
        assert!(!is_numeric("45X"));
        assert!(is_date_like("3/6"));
        assert!(is_date_like("1997-2011"));
        assert!(!is_date_like("1-2-3-4"));
        assert!(!is_date_like("non-mosaic"));
        assert!(!is_date_like("½/3"));
        assert!(!is_date_like("²-3"));
        assert!(!is_date_like("٣/٦"));
    }

    #[test]
    fn test_fraction_like_token_is_kept() {
        let terms = TokenProcessor::new().extract("½/3");
        assert!(terms.contains("½/3"));
        assert!(TokenProcessor::new().extract("3/6").is_empty());
    }

    #[test]
    fn test_default_drops_english_stop_words() {
        let processor = TokenProcessor::new();
        assert!(processor.extract("The").is_empty());
        assert!(processor.extract("with").is_empty());
        assert!(processor.extract("between").is_empty());
        assert_eq!(processor.extract("girls").get("girls"), 1);
    }

    #[test]
    fn test_empty_stop_words_keep_everything() {
        let processor = TokenProcessor::new().with_stop_words(std::iter::empty::<&str>());
        assert_eq!(processor.extract("the").get("the"), 1);
    }

    #[test]
    fn test_capitalization_rules() {
        assert!(is_capitalization_idiomatic("DNA"));
        assert!(is_capitalization_idiomatic("mRNA"));
        assert!(!is_capitalization_idiomatic("Turner"));
        assert!(!is_capitalization_idiomatic("aorta"));
        assert!(!is_capitalization_idiomatic("x-ray"));
    }
}
