// Note: the WS-Man session, SOAP envelopes and authentication live behind this trait.
// The engine only ever sees flat records and never retries a failed call.

use std::{collections::BTreeMap, future::Future};

use crate::{constants::FIELD_REBOOT_REQUIRED, error::Result};

#[cfg(test)]
pub(crate) mod mock;

pub type Selectors = BTreeMap<String, String>;
pub type Properties = BTreeMap<String, PropertyValue>;

/// One item of an enumeration, or the output of an invoked method.
///
/// Fields may repeat (e.g. `PossibleValues`), so each one maps to every value
/// seen for it, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, Vec<String>>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    /// The first value of `field`. Nil elements arrive as empty text and are
    /// reported as absent.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|values| values.first())
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn get_all(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (field, value) in iter {
            record.push(field, value);
        }
        record
    }
}

/// An input property of an invoked method. Array parameters are sent as
/// repeated elements, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// The management protocol as seen by the settings engine.
///
/// Implementations own sessions, timeouts and retries. Errors are expected to be
/// [`Error::TransportFailure`](crate::Error::TransportFailure),
/// [`Error::InvalidResponse`](crate::Error::InvalidResponse) or
/// [`Error::RemoteOperationFailed`](crate::Error::RemoteOperationFailed).
pub trait Transport {
    /// Enumerate every instance of the class at `namespace`.
    fn enumerate(&self, namespace: &str) -> impl Future<Output = Result<Vec<RawRecord>>> + Send;

    /// Invoke `method` on the instance of `namespace` identified by `selectors`.
    fn invoke(
        &self,
        namespace: &str,
        method: &str,
        selectors: &Selectors,
        properties: &Properties,
    ) -> impl Future<Output = Result<RawRecord>> + Send;

    /// Whether the output of a method invoked on `namespace` asks for a reboot
    /// before pending values take effect.
    fn is_reboot_required(&self, response: &RawRecord, _namespace: &str) -> bool {
        response
            .get(FIELD_REBOOT_REQUIRED)
            .map(|value| value.eq_ignore_ascii_case("yes"))
            .unwrap_or(false)
    }
}
