//! Lemmatization hook.

/// Maps a lower-cased word to its lemma or stem.
pub trait Lemmatizer: Send + Sync {
    /// Lemma of `word`. Return the word unchanged when there is none.
    fn lemmatize(&self, word: &str) -> String;
}

impl<F> Lemmatizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn lemmatize(&self, word: &str) -> String {
        self(word)
    }
}

/// Lemmatizer that returns every word unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Lemmatizer for Identity {
    fn lemmatize(&self, word: &str) -> String {
        word.to_string()
    }
}
