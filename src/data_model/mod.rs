//! Defines the configurable attributes exposed by a controller

use std::fmt;

use regex::Regex;

pub mod parse;
pub mod validate;

pub use validate::Violation;

/// The constraint namespace an attribute was reported by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKind {
    /// No constraint is known beyond read-only.
    Generic,
    Enumerable,
    String,
    Integer,
}

/// Whether attributes of a family belong to one device instance or to the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scoping {
    /// e.g. BIOS settings, reported without an FQDD
    DeviceGlobal,
    /// e.g. NIC settings, every record carries the FQDD of its port
    PerInstance,
}

/// A reported attribute value.
///
/// Integer attributes are converted when parsed, everything else is kept as text.
/// Comparisons with proposed values always go through the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AttributeValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Text(value) => f.write_str(value),
            AttributeValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// A regular expression a string attribute must match somewhere in the value.
///
/// The controller reports PCRE expressions. One the `regex` crate cannot compile
/// is kept with its compile error and only fails validation of its own attribute.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.to_owned(),
            compiled: Regex::new(source),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_supported(&self) -> bool {
        self.compiled.is_ok()
    }

    /// Search semantics, the match does not need to be anchored.
    pub fn is_match(&self, value: &str) -> Result<bool, &regex::Error> {
        self.compiled.as_ref().map(|regex| regex.is_match(value))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

/// Kind specific constraints of an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraints {
    Generic,
    Enumerable {
        /// In the order the controller reported them
        possible_values: Vec<String>,
    },
    String {
        // Carried for display, only the pattern is enforced.
        min_length: i64,
        max_length: i64,
        pattern: Option<Pattern>,
    },
    Integer {
        lower_bound: i64,
        upper_bound: i64,
    },
}

impl Constraints {
    pub fn kind(&self) -> AttributeKind {
        match self {
            Constraints::Generic => AttributeKind::Generic,
            Constraints::Enumerable { .. } => AttributeKind::Enumerable,
            Constraints::String { .. } => AttributeKind::String,
            Constraints::Integer { .. } => AttributeKind::Integer,
        }
    }
}

/// One configurable attribute as reported by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// FQDD of the owning device, absent for device global attributes
    pub device_instance_id: Option<String>,
    pub name: String,
    pub current_value: Option<AttributeValue>,
    /// Written but not committed yet
    pub pending_value: Option<AttributeValue>,
    pub read_only: bool,
    pub constraints: Constraints,
}

impl AttributeDescriptor {
    pub fn kind(&self) -> AttributeKind {
        self.constraints.kind()
    }

    /// Whether writing `proposed` would leave the current value as it is.
    /// An attribute without a reported value is never unchanged.
    pub fn is_unchanged_by(&self, proposed: &str) -> bool {
        self.current_value
            .as_ref()
            .is_some_and(|current| current.to_string() == proposed)
    }

    /// A prior write is waiting for a configuration job.
    pub fn has_pending_change(&self) -> bool {
        self.pending_value.is_some() && self.pending_value != self.current_value
    }
}
