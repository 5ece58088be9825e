//! Turning raw abstract text into term-frequency vectors.
//!
//! The engine only consumes [`TermCounts`](crate::TermCounts); this module is
//! one way to produce them. It strips punctuation, folds Greek letters and
//! sub/superscripts to ASCII, drops short, numeric and date-like tokens, and
//! keeps acronyms and mixed-case gene names alongside their lower-cased form.
//!
//! Common English words are dropped by default ([`stopwords::ENGLISH`]);
//! [`TokenProcessor::with_stop_words`] replaces the list. Stemming or
//! lemmatization is pluggable through [`Lemmatizer`]; none is bundled.
//!
//! ```rust
//! use reciprocal::text::{LanguageModelBuilder, TokenProcessor};
//!
//! let builder = LanguageModelBuilder::new(TokenProcessor::new().with_stop_words(["with"]));
//! let counts = builder.build("Girls with coarctation of the aorta (DNA).");
//! assert_eq!(counts.get("coarctation"), 1);
//! assert_eq!(counts.get("DNA"), 1);
//! assert_eq!(counts.get("dna"), 1);
//! assert_eq!(counts.get("with"), 0);
//! ```

mod lemma;
pub mod stopwords;
mod tokenize;

pub use lemma::{Identity, Lemmatizer};
pub use tokenize::TokenProcessor;

use crate::item::TermCounts;

/// Builds a unigram language model from whole texts.
#[derive(Debug, Clone, Default)]
pub struct LanguageModelBuilder {
    processor: TokenProcessor,
}

impl LanguageModelBuilder {
    /// Create a builder around a token processor.
    pub fn new(processor: TokenProcessor) -> Self {
        Self { processor }
    }

    /// The token processor in use.
    pub fn processor(&self) -> &TokenProcessor {
        &self.processor
    }

    /// Term counts for `text`: split on spaces, extract from each token, sum.
    pub fn build(&self, text: &str) -> TermCounts {
        let mut counts = TermCounts::new();
        for token in text.split(' ') {
            counts.merge(&self.processor.extract(token));
        }
        counts
    }
}
