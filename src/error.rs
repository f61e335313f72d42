//! Error types for catalog building, reconciliation and commit.

use std::fmt;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A record reported by the controller could not be turned into a descriptor.
    #[error("malformed attribute {} in {namespace}: {reason}", .name.as_deref().unwrap_or("<unnamed>"))]
    MalformedAttribute {
        namespace: String,
        name: Option<String>,
        reason: String,
    },

    /// The same attribute name is owned by more than one namespace.
    #[error("colliding attributes {names:?}")]
    AttributeCollision { names: Vec<String> },

    /// Every problem found while reconciling a change request.
    #[error("{0}")]
    Rejected(RejectionReport),

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The controller processed the request and reported an error.
    #[error("remote operation failed: {message}")]
    RemoteOperationFailed { message: String },
}

impl Error {
    pub(crate) fn malformed(
        namespace: &str,
        name: Option<&str>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedAttribute {
            namespace: namespace.to_owned(),
            name: name.map(str::to_owned),
            reason: reason.into(),
        }
    }
}

/// A single reason a proposed attribute was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    UnknownAttribute { name: String },
    ReadOnly { name: String },
    ValidationFailed { name: String, diagnostic: String },
}

impl Rejection {
    pub fn name(&self) -> &str {
        match self {
            Rejection::UnknownAttribute { name }
            | Rejection::ReadOnly { name }
            | Rejection::ValidationFailed { name, .. } => name,
        }
    }
}

/// Aggregated rejections of one change request.
///
/// Rendered as one line for unknown names, one line per validation diagnostic,
/// then one line for read-only names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionReport {
    pub rejections: Vec<Rejection>,
}

impl RejectionReport {
    pub fn is_empty(&self) -> bool {
        self.rejections.is_empty()
    }

    pub fn unknown(&self) -> impl Iterator<Item = &str> {
        self.rejections.iter().filter_map(|r| match r {
            Rejection::UnknownAttribute { name } => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn read_only(&self) -> impl Iterator<Item = &str> {
        self.rejections.iter().filter_map(|r| match r {
            Rejection::ReadOnly { name } => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &str> {
        self.rejections.iter().filter_map(|r| match r {
            Rejection::ValidationFailed { diagnostic, .. } => Some(diagnostic.as_str()),
            _ => None,
        })
    }
}

impl fmt::Display for RejectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = Vec::new();
        let unknown: Vec<_> = self.unknown().collect();
        if !unknown.is_empty() {
            lines.push(format!("Unknown attributes found: {unknown:?}"));
        }
        lines.extend(self.diagnostics().map(str::to_owned));
        let read_only: Vec<_> = self.read_only().collect();
        if !read_only.is_empty() {
            lines.push(format!("Cannot set read-only attributes: {read_only:?}."));
        }
        f.write_str(&lines.join("\n"))
    }
}
