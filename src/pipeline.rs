//! End-to-end clustering of abstracts listed in a dataset file.
//!
//! Retrieval of abstract text is delegated to an [`AbstractSource`], which is
//! where a network fetcher or on-disk cache plugs in. Abstracts that cannot
//! be retrieved are skipped with a warning rather than failing the run.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::dataset::DatasetDescriptor;
use crate::engine::MutualBestMatch;
use crate::error::{Error, Result};
use crate::item::Item;
use crate::scorer::{DotProduct, Scorer};
use crate::text::LanguageModelBuilder;

/// Section name holding the full abstract text.
pub const DEFAULT_SECTION: &str = "text";

/// A retrieved abstract: identifier plus named text sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abstract {
    /// Identifier (PubMed id).
    pub id: u64,
    /// Section name -> text. The full text lives under [`DEFAULT_SECTION`].
    pub sections: BTreeMap<String, String>,
}

impl Abstract {
    /// An abstract with only the full-text section.
    pub fn new(id: u64, text: impl Into<String>) -> Self {
        let mut sections = BTreeMap::new();
        sections.insert(DEFAULT_SECTION.to_string(), text.into());
        Self { id, sections }
    }

    /// Add a named section (e.g. `background`, `results`).
    pub fn with_section(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sections.insert(name.into(), text.into());
        self
    }

    /// Full abstract text; empty if the source supplied none.
    pub fn text(&self) -> &str {
        self.sections
            .get(DEFAULT_SECTION)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Anything that can hand back an abstract by identifier.
pub trait AbstractSource {
    /// Retrieve the abstract for `id`.
    fn fetch(&self, id: u64) -> Result<Abstract>;
}

/// Abstracts held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    abstracts: HashMap<u64, Abstract>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an abstract.
    pub fn insert(&mut self, abstract_: Abstract) {
        let _ = self.abstracts.insert(abstract_.id, abstract_);
    }

    /// Number of abstracts held.
    pub fn len(&self) -> usize {
        self.abstracts.len()
    }

    /// True if no abstracts are held.
    pub fn is_empty(&self) -> bool {
        self.abstracts.is_empty()
    }
}

impl FromIterator<Abstract> for MemorySource {
    fn from_iter<I: IntoIterator<Item = Abstract>>(iter: I) -> Self {
        let mut source = MemorySource::new();
        for a in iter {
            source.insert(a);
        }
        source
    }
}

impl AbstractSource for MemorySource {
    fn fetch(&self, id: u64) -> Result<Abstract> {
        self.abstracts
            .get(&id)
            .cloned()
            .ok_or(Error::MissingAbstract { id })
    }
}

/// File extension of abstracts stored by [`DirectorySource`].
pub const ABSTRACT_SUFFIX: &str = "txt";

/// Abstracts stored one per file as `<dir>/<id>.txt`, the file holding the
/// full text.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    /// Read abstracts from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory abstracts are read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.{ABSTRACT_SUFFIX}"))
    }
}

impl AbstractSource for DirectorySource {
    fn fetch(&self, id: u64) -> Result<Abstract> {
        match fs::read_to_string(self.path_of(id)) {
            Ok(text) => Ok(Abstract::new(id, text.trim_end())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(Error::MissingAbstract { id })
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Clusters abstracts by their term content.
#[derive(Debug, Clone)]
pub struct TermClusterer<Src, S = DotProduct> {
    source: Src,
    builder: LanguageModelBuilder,
    engine: MutualBestMatch<S>,
}

impl<Src: AbstractSource> TermClusterer<Src, DotProduct> {
    /// Create a clusterer with the default language model and engine.
    pub fn new(source: Src) -> Self {
        Self {
            source,
            builder: LanguageModelBuilder::default(),
            engine: MutualBestMatch::new(),
        }
    }
}

impl<Src: AbstractSource, S: Scorer> TermClusterer<Src, S> {
    /// Replace the language model builder.
    pub fn with_builder(mut self, builder: LanguageModelBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Replace the clustering engine.
    pub fn with_engine<T: Scorer>(self, engine: MutualBestMatch<T>) -> TermClusterer<Src, T> {
        TermClusterer {
            source: self.source,
            builder: self.builder,
            engine,
        }
    }

    /// The clustering engine in use.
    pub fn engine(&self) -> &MutualBestMatch<S> {
        &self.engine
    }

    /// Fetch each abstract and build its term counts.
    ///
    /// Ids whose abstracts cannot be retrieved are skipped and reported in a
    /// single warning.
    pub fn build_items(&self, ids: &[u64]) -> Vec<Item> {
        let mut items = Vec::with_capacity(ids.len());
        let mut missed = Vec::new();

        for &id in ids {
            match self.source.fetch(id) {
                Ok(abstract_) => {
                    let counts = self.builder.build(abstract_.text());
                    debug!(id, terms = counts.len(), "language model built");
                    items.push(Item::new(id, counts));
                }
                Err(err) => {
                    warn!(id, error = %err, "abstract unavailable");
                    missed.push(id);
                }
            }
        }

        if !missed.is_empty() {
            warn!(count = missed.len(), ids = ?missed, "missing articles");
        }
        items
    }

    /// Cluster the articles listed in an unlabeled dataset.
    pub fn predict_clusters(&self, dataset: &DatasetDescriptor) -> Result<Vec<BTreeSet<u64>>> {
        let ids = dataset.read_ids()?;
        self.engine.cluster_ids(&self.build_items(&ids))
    }

    /// Cluster the articles of a labeled dataset and return the prediction
    /// alongside the labeled grouping, unmodified.
    pub fn predict_clusters_and_evaluate(
        &self,
        dataset: &DatasetDescriptor,
    ) -> Result<(Vec<BTreeSet<u64>>, Vec<BTreeSet<u64>>)> {
        let labeled = dataset.read_labeled()?;
        let items = self.build_items(&labeled.ids);
        self.engine.cluster_with_truth(&items, labeled.groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Evaluation;
    use crate::text::TokenProcessor;
    use std::io::Write;

    fn corpus() -> MemorySource {
        [
            Abstract::new(1, "Coarctation of the aorta in girls with Turner syndrome"),
            Abstract::new(2, "Turner syndrome girls: coarctation and aortic valve"),
            Abstract::new(3, "Insulin resistance and glucose metabolism in obesity"),
            Abstract::new(4, "Glucose metabolism, insulin signalling and obesity"),
        ]
        .into_iter()
        .collect()
    }

    fn clusterer() -> TermClusterer<MemorySource> {
        let processor = TokenProcessor::new().with_stop_words(["the", "and", "with"]);
        TermClusterer::new(corpus()).with_builder(LanguageModelBuilder::new(processor))
    }

    #[test]
    fn test_abstract_sections() {
        let a = Abstract::new(7, "full").with_section("results", "part");
        assert_eq!(a.text(), "full");
        assert_eq!(a.sections["results"], "part");

        let empty = Abstract {
            id: 8,
            sections: BTreeMap::new(),
        };
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_memory_source_missing() {
        assert!(matches!(
            corpus().fetch(99),
            Err(Error::MissingAbstract { id: 99 })
        ));
    }

    #[test]
    fn test_directory_source() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("12.txt"), "Coarctation of the aorta\n").unwrap();
        fs::create_dir(dir.path().join("13.txt")).unwrap();
        let source = DirectorySource::new(dir.path());

        let a = source.fetch(12).unwrap();
        assert_eq!(a.id, 12);
        assert_eq!(a.text(), "Coarctation of the aorta");
        assert!(matches!(
            source.fetch(99),
            Err(Error::MissingAbstract { id: 99 })
        ));
        // present but unreadable is an I/O failure, not a missing abstract
        assert!(matches!(source.fetch(13), Err(Error::Io(_))));
    }

    #[test]
    fn test_default_clusterer_ignores_function_words() {
        // 2 and 3 share only filler words; counted, those would pair them
        let source: MemorySource = [
            Abstract::new(1, "coarctation aorta turner"),
            Abstract::new(2, "the insulin and the glucose with the obesity and the"),
            Abstract::new(3, "the coarctation and the aorta with the valve and the"),
            Abstract::new(4, "insulin glucose obesity"),
        ]
        .into_iter()
        .collect();
        let clusterer = TermClusterer::new(source);

        let items = clusterer.build_items(&[1, 2, 3, 4]);
        assert_eq!(items[1].counts.get("the"), 0);
        let clusters = clusterer.engine().cluster_ids(&items).unwrap();
        assert_eq!(
            clusters,
            vec![BTreeSet::from([1, 3]), BTreeSet::from([2, 4])]
        );
    }

    #[test]
    fn test_build_items_skips_missing() {
        let items = clusterer().build_items(&[1, 99, 3]);
        let ids: Vec<u64> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(items[0].counts.get("coarctation") > 0);
    }

    #[test]
    fn test_predict_clusters_and_evaluate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (id, label) in [(1, "cardio"), (2, "cardio"), (3, "metab"), (4, "metab")] {
            writeln!(file, "{id}\t{label}").unwrap();
        }
        let dataset = DatasetDescriptor::new(file.path());

        let (predicted, expected) = clusterer().predict_clusters_and_evaluate(&dataset).unwrap();
        assert_eq!(expected, vec![BTreeSet::from([1, 2]), BTreeSet::from([3, 4])]);
        assert_eq!(predicted, expected);
        assert!((Evaluation::compare(&predicted, &expected).ari - 1.0).abs() < 1e-9);

        let unlabeled = clusterer().predict_clusters(&dataset).unwrap();
        assert_eq!(unlabeled, predicted);
    }
}
