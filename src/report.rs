//! Anomalies recorded during a clustering run.
//!
//! Two conditions are recovered locally instead of failing the run:
//! - the traversal dequeues an item it has already visited (skipped), and
//! - an item is never reached by propagation (promoted to a singleton).
//!
//! Both are logged through `tracing` as they happen and collected here so
//! callers can inspect them after the fact.

use std::collections::HashMap;
use std::fmt;

/// Severity level for a recorded issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Informational, not a problem.
    Info,
    /// Something unusual but handled.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARN"),
        }
    }
}

/// What kind of anomaly an [`Issue`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    /// Traversal re-encountered an already-visited item and skipped it.
    RevisitSkipped,
    /// Item was unreachable from every mutual pair and got its own cluster.
    Orphan,
}

/// A single recorded anomaly.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    /// Severity of the issue.
    pub severity: Severity,
    /// Kind of anomaly.
    pub kind: IssueKind,
    /// Identifier of the item involved.
    pub item_id: u64,
    /// Optional additional context.
    pub context: Option<String>,
}

impl Issue {
    /// Create a new issue for `item_id`.
    pub fn new(severity: Severity, kind: IssueKind, item_id: u64) -> Self {
        Self {
            severity,
            kind,
            item_id,
            context: None,
        }
    }

    /// Add context to this issue.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            IssueKind::RevisitSkipped => "cycle found, skipped",
            IssueKind::Orphan => "unassigned, promoted to singleton",
        };
        write!(f, "[{}] {} (item {})", self.severity, what, self.item_id)?;
        if let Some(ctx) = &self.context {
            write!(f, " - {}", ctx)?;
        }
        Ok(())
    }
}

/// Issues collected over one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    /// All issues, in the order they were found.
    pub issues: Vec<Issue>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Add an issue to the report.
    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    /// True if nothing unusual happened.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Identifiers of items affected by issues of `kind`, in report order.
    pub fn affected(&self, kind: IssueKind) -> Vec<u64> {
        self.issues
            .iter()
            .filter(|i| i.kind == kind)
            .map(|i| i.item_id)
            .collect()
    }

    /// Issues of a specific severity or higher.
    pub fn issues_at_level(&self, min_severity: Severity) -> Vec<&Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity >= min_severity)
            .collect()
    }

    /// Count issues by kind.
    pub fn counts(&self) -> HashMap<IssueKind, usize> {
        let mut counts = HashMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_default() += 1;
        }
        counts
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return write!(f, "Run report: no issues");
        }

        let counts = self.counts();
        let parts: Vec<String> = [
            (IssueKind::Orphan, "orphans"),
            (IssueKind::RevisitSkipped, "revisits skipped"),
        ]
        .iter()
        .filter_map(|(kind, name)| counts.get(kind).map(|c| format!("{} {}", c, name)))
        .collect();

        writeln!(f, "Run report: {}", parts.join(", "))?;
        for issue in &self.issues {
            writeln!(f, "  {}", issue)?;
        }
        Ok(())
    }
}
