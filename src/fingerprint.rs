use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::github::types::IssueSummary;

/// Content hash of a rendered issue title. No normalization is applied:
/// titles differing only in case or whitespace are different issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    pub fn of(rendered_title: &str) -> Self {
        Fingerprint(hex::encode(Sha256::digest(rendered_title.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Issues already present in the target repository, keyed by title
/// fingerprint. Built once per run and never persisted.
#[derive(Debug, Default)]
pub struct ExistingIssueIndex {
    issues: HashMap<Fingerprint, IssueSummary>,
}

impl ExistingIssueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later issues with the same title replace earlier ones.
    pub fn from_issues(issues: impl IntoIterator<Item = IssueSummary>) -> Self {
        let mut index = Self::new();
        for issue in issues {
            index.insert(issue);
        }
        index
    }

    pub fn insert(&mut self, issue: IssueSummary) {
        self.issues.insert(Fingerprint::of(&issue.title), issue);
    }

    /// Record an issue under a fingerprint computed by the caller, for
    /// issues whose remote title may differ from the rendered one.
    pub fn insert_as(&mut self, fingerprint: Fingerprint, issue: IssueSummary) {
        self.issues.insert(fingerprint, issue);
    }

    pub fn get(&self, fingerprint: &Fingerprint) -> Option<&IssueSummary> {
        self.issues.get(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }
}
