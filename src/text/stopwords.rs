//! Default English stop words.

/// Common English function words dropped by [`TokenProcessor::new`].
///
/// Matched against the lower-cased token. Words shorter than the default
/// minimum token length are omitted since they never reach the lookup.
///
/// [`TokenProcessor::new`]: super::TokenProcessor::new
pub const ENGLISH: &[&str] = &[
    "about", "above", "after", "again", "against", "all", "also", "although", "among", "and",
    "another", "any", "are", "aren't", "because", "been", "before", "being", "below", "between",
    "both", "but", "can", "cannot", "could", "did", "didn't", "does", "doesn't", "doing",
    "don't", "down", "during", "each", "either", "else", "ever", "every", "few", "for", "from",
    "further", "had", "has", "hasn't", "have", "haven't", "having", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "however", "into", "isn't", "its", "itself",
    "just", "may", "might", "more", "most", "must", "myself", "neither", "nor", "not", "now",
    "off", "once", "only", "other", "otherwise", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "since", "some", "such", "than", "that", "the",
    "their", "theirs", "them", "themselves", "then", "there", "therefore", "these", "they",
    "this", "those", "though", "through", "thus", "too", "under", "until", "upon", "very",
    "was", "wasn't", "were", "weren't", "what", "when", "where", "whether", "which", "while",
    "who", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves",
];
