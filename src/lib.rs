//! # reciprocal
//!
//! Mutual-best-match clustering: group documents by topic without choosing a
//! cluster count or a similarity threshold.
//!
//! Each item links to its single most similar neighbor. Pairs that pick each
//! other seed clusters, and every other item follows its chain of nearest
//! neighbors into one of them. Items no chain reaches become singletons.
//!
//! The engine works on [`TermCounts`] vectors and is agnostic to where they
//! come from. The `text` feature (on by default) adds a tokenizer tuned for
//! biomedical abstracts, and [`pipeline`] wires a source of abstracts, the
//! tokenizer and the engine together for dataset files.
//!
//! ```rust
//! use reciprocal::{Item, MutualBestMatch};
//!
//! let items = vec![
//!     Item::from_pairs(101, [("coarctation", 2), ("aorta", 1)]),
//!     Item::from_pairs(102, [("coarctation", 1), ("aorta", 2)]),
//!     Item::from_pairs(103, [("aorta", 1)]),
//! ];
//! let assignment = MutualBestMatch::new().assign(&items).unwrap();
//! assert_eq!(assignment.n_clusters(), 1);
//! assert!(assignment.orphans().is_empty());
//! ```
//!
//! ## Features
//!
//! - `text` (default): [`text`] tokenization, [`pipeline`] end-to-end clustering.
//! - `parallel`: score pairs with rayon.
//! - `graph`: export nearest-neighbor edges as a petgraph graph.

pub mod dataset;
pub mod display;
pub mod engine;
/// Error types used across `reciprocal`.
pub mod error;
pub mod item;
pub mod metrics;
#[cfg(feature = "text")]
pub mod pipeline;
pub mod report;
pub mod scorer;
#[cfg(feature = "text")]
pub mod text;


pub use engine::{Assignment, AssignmentTree, BestMatch, Cluster, MutualBestMatch};
pub use error::{Error, Result};
pub use item::{Item, TermCounts};
pub use metrics::{
    ari, completeness, fowlkes_mallows, homogeneity, nmi, purity, v_measure, Evaluation,
};
pub use report::{Issue, IssueKind, Report, Severity};
pub use scorer::{Cosine, DotProduct, Jaccard, Scorer};

#[cfg(feature = "text")]
pub use pipeline::{Abstract, AbstractSource, DirectorySource, MemorySource, TermClusterer};
#[cfg(feature = "text")]
pub use text::{LanguageModelBuilder, TokenProcessor};
