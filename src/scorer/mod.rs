//! Pairwise similarity between term-frequency vectors.
//!
//! The engine asks one question of a scorer: how similar is `candidate` to
//! `target`? Higher is more similar; there is no fixed range. The scorer is
//! injected into [`MutualBestMatch`](crate::MutualBestMatch) at construction,
//! so strategies can be swapped without touching tree building or propagation.
//!
//! ## Strategies
//!
//! | Scorer | Formula | Notes |
//! |--------|---------|-------|
//! | [`DotProduct`] | Σ tf_a(t) × tf_b(t) | Default. Favors long documents |
//! | [`Cosine`] | dot / (‖a‖ ‖b‖) | Length-normalized, in [0, 1] |
//! | [`Jaccard`] | \|A ∩ B\| / \|A ∪ B\| | Ignores counts, set overlap only |
//!
//! Absent terms count as zero; no scorer has an error path.
//!
//! ```rust
//! use reciprocal::scorer::{DotProduct, Scorer};
//! use reciprocal::TermCounts;
//!
//! let a = TermCounts::from_iter([("aorta", 2), ("turner", 1)]);
//! let b = TermCounts::from_iter([("aorta", 3), ("valve", 4)]);
//! assert_eq!(DotProduct.score(&a, &b), 6.0);
//! ```

mod dot;
mod overlap;
mod traits;

pub use dot::DotProduct;
pub use overlap::{Cosine, Jaccard};
pub use traits::{from_fn, FnScorer, Scorer};
