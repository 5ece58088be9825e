//! Identifier lists and labeled ground truth.
//!
//! Two plain-text layouts, one record per line:
//!
//! ```text
//! unlabeled:  <id>[<sep>anything...]
//! labeled:    <id><sep><label>
//! ```
//!
//! Blank lines are skipped. Labels are arbitrary strings; each distinct label
//! becomes one ground-truth group, numbered by first appearance.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default field separator.
pub const TAB: &str = "\t";

/// Location and layout of a dataset file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetDescriptor {
    /// Path to the file.
    pub path: PathBuf,
    /// Field separator.
    pub separator: String,
}

impl DatasetDescriptor {
    /// Describe a tab-separated file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: TAB.to_string(),
        }
    }

    /// Set the field separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Identifiers listed in the file, in file order.
    pub fn read_ids(&self) -> Result<Vec<u64>> {
        parse_ids(&read(&self.path)?, &self.separator)
    }

    /// Identifiers in file order plus the ground-truth partition.
    pub fn read_labeled(&self) -> Result<Labeled> {
        parse_labeled(&read(&self.path)?, &self.separator)
    }
}

fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

fn validate_separator(separator: &str) -> Result<()> {
    if separator.is_empty() {
        return Err(Error::InvalidParameter {
            name: "separator",
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}

fn parse_id(field: &str, line: usize) -> Result<u64> {
    field.trim().parse().map_err(|_| Error::Parse {
        line,
        message: format!("invalid identifier {field:?}"),
    })
}

/// Records of a labeled dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labeled {
    /// Identifiers in file order.
    pub ids: Vec<u64>,
    /// One set per distinct label, in order of first appearance.
    pub groups: Vec<BTreeSet<u64>>,
    /// Label text per group.
    pub labels: Vec<String>,
}

/// Parse an unlabeled listing: the first field of each non-blank line.
pub fn parse_ids(content: &str, separator: &str) -> Result<Vec<u64>> {
    validate_separator(separator)?;
    let mut ids = Vec::new();
    for (i, row) in content.lines().enumerate() {
        let row = row.trim();
        if row.is_empty() {
            continue;
        }
        let first = row.split(separator).next().unwrap_or(row);
        ids.push(parse_id(first, i + 1)?);
    }
    Ok(ids)
}

/// Parse a labeled listing into ids and a ground-truth partition.
pub fn parse_labeled(content: &str, separator: &str) -> Result<Labeled> {
    validate_separator(separator)?;
    let mut ids = Vec::new();
    let mut groups: Vec<BTreeSet<u64>> = Vec::new();
    let mut labels: Vec<String> = Vec::new();
    let mut group_of: HashMap<String, usize> = HashMap::new();

    for (i, row) in content.lines().enumerate() {
        let line = i + 1;
        let row = row.trim();
        if row.is_empty() {
            continue;
        }

        let mut fields = row.split(separator);
        let id = parse_id(fields.next().unwrap_or(row), line)?;
        let label = fields
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::Parse {
                line,
                message: "missing label".to_string(),
            })?;

        let k = *group_of.entry(label.to_string()).or_insert_with(|| {
            groups.push(BTreeSet::new());
            labels.push(label.to_string());
            groups.len() - 1
        });
        groups[k].insert(id);
        ids.push(id);
    }

    Ok(Labeled {
        ids,
        groups,
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_ids_first_field() {
        let content = "8001324\textra\n12598898\n\n14707528\tmore\tfields\n";
        assert_eq!(
            parse_ids(content, TAB).unwrap(),
            vec![8001324, 12598898, 14707528]
        );
    }

    #[test]
    fn test_parse_ids_bad_line_number() {
        let err = parse_ids("1\n2\nabc\n", TAB).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn test_parse_labeled_groups_by_first_appearance() {
        let content = "10 cardio\n20 onco\n30 cardio\n40 neuro\n";
        let labeled = parse_labeled(content, " ").unwrap();

        assert_eq!(labeled.ids, vec![10, 20, 30, 40]);
        assert_eq!(labeled.labels, vec!["cardio", "onco", "neuro"]);
        assert_eq!(
            labeled.groups,
            vec![
                BTreeSet::from([10, 30]),
                BTreeSet::from([20]),
                BTreeSet::from([40])
            ]
        );
    }

    #[test]
    fn test_parse_labeled_missing_label() {
        let err = parse_labeled("10\tx\n20\n", TAB).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_separator_rejected() {
        assert!(matches!(
            parse_ids("1", ""),
            Err(Error::InvalidParameter { name: "separator", .. })
        ));
    }

    #[test]
    fn test_descriptor_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "5,a").unwrap();
        writeln!(file, "6,b").unwrap();

        let descriptor = DatasetDescriptor::new(file.path()).with_separator(",");
        assert_eq!(descriptor.read_ids().unwrap(), vec![5, 6]);
        assert_eq!(descriptor.read_labeled().unwrap().groups.len(), 2);
    }

    #[test]
    fn test_descriptor_missing_file() {
        let descriptor = DatasetDescriptor::new("/nonexistent/reciprocal/ids.tsv");
        assert!(matches!(descriptor.read_ids(), Err(Error::Io(_))));
    }
}
