//! Deciding which proposed settings can be written.
//!
//! A change request is accepted as a whole or not at all. Every proposed name is
//! classified as unknown, unchanged, read-only, invalid or accepted, and any
//! entry in the unknown, read-only or invalid sets rejects the request.

use std::collections::{btree_map, BTreeMap, BTreeSet};

use tracing::{info, warn};

use crate::{
    catalog::SettingsCatalog,
    data_model::Violation,
    error::{Error, Rejection, RejectionReport, Result},
};

pub mod commit;

/// Proposed values keyed by attribute name. Values are kept in their string form,
/// integer attributes accept anything that parses as an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeRequest {
    values: BTreeMap<String, String>,
}

impl ChangeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl ToString) -> &mut Self {
        self.values.insert(name.into(), value.to_string());
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.values.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for ChangeRequest
where
    K: Into<String>,
    V: ToString,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut request = Self::new();
        for (name, value) in iter {
            request.set(name, value);
        }
        request
    }
}

/// Classification of every name of a [`ChangeRequest`]. The sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationOutcome {
    /// Not in the catalog
    pub unknown: BTreeSet<String>,
    /// Proposed value equals the current value
    pub unchanged: BTreeSet<String>,
    pub read_only_rejected: BTreeSet<String>,
    pub invalid: BTreeMap<String, Violation>,
    /// Name to value, to be written
    pub accepted: BTreeMap<String, String>,
    /// Only set once the accepted values have been written
    pub commit_required: bool,
}

impl ReconciliationOutcome {
    pub fn is_rejected(&self) -> bool {
        !(self.unknown.is_empty() && self.read_only_rejected.is_empty() && self.invalid.is_empty())
    }

    /// Nothing to write and nothing rejected.
    pub fn is_noop(&self) -> bool {
        !self.is_rejected() && self.accepted.is_empty()
    }

    pub fn rejection_report(&self) -> RejectionReport {
        let unknown = self
            .unknown
            .iter()
            .map(|name| Rejection::UnknownAttribute { name: name.clone() });
        let invalid = self
            .invalid
            .iter()
            .map(|(name, violation)| Rejection::ValidationFailed {
                name: name.clone(),
                diagnostic: violation.to_string(),
            });
        let read_only = self
            .read_only_rejected
            .iter()
            .map(|name| Rejection::ReadOnly { name: name.clone() });
        RejectionReport {
            rejections: unknown.chain(invalid).chain(read_only).collect(),
        }
    }

    /// The values to write, or every rejection at once.
    pub fn accepted_or_rejected(&self) -> Result<&BTreeMap<String, String>> {
        if self.is_rejected() {
            Err(Error::Rejected(self.rejection_report()))
        } else {
            Ok(&self.accepted)
        }
    }
}

/// Classify `request` against the live `catalog`. Checks per name, in order:
/// unknown, unchanged, read-only, then the kind specific constraints.
pub fn reconcile(catalog: &SettingsCatalog, request: &ChangeRequest) -> ReconciliationOutcome {
    let mut outcome = ReconciliationOutcome::default();
    for (name, proposed) in request.iter() {
        let Some(attribute) = catalog.get(name) else {
            outcome.unknown.insert(name.clone());
            continue;
        };
        if attribute.is_unchanged_by(proposed) {
            outcome.unchanged.insert(name.clone());
        } else if attribute.read_only {
            outcome.read_only_rejected.insert(name.clone());
        } else {
            match attribute.validate(proposed) {
                Ok(()) => {
                    outcome.accepted.insert(name.clone(), proposed.clone());
                }
                Err(violation) => {
                    outcome.invalid.insert(name.clone(), violation);
                }
            }
        }
    }

    if !outcome.unchanged.is_empty() {
        info!(
            device = catalog.device_instance_id(),
            attributes = ?outcome.unchanged,
            "ignoring unchanged attributes"
        );
    }
    if outcome.is_rejected() {
        warn!(
            device = catalog.device_instance_id(),
            unknown = outcome.unknown.len(),
            read_only = outcome.read_only_rejected.len(),
            invalid = outcome.invalid.len(),
            "rejecting change request"
        );
    }
    outcome
}
