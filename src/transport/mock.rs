//! A recording transport for tests.

use std::{collections::BTreeMap, sync::Mutex};

use crate::{
    constants::*,
    error::{Error, Result},
};

use super::{Properties, RawRecord, Selectors, Transport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Invocation {
    pub namespace: String,
    pub method: String,
    pub selectors: Selectors,
    pub properties: Properties,
}

pub(crate) struct MockTransport {
    items: BTreeMap<String, Vec<RawRecord>>,
    response: RawRecord,
    failure: Option<String>,
    enumerated: Mutex<Vec<String>>,
    invocations: Mutex<Vec<Invocation>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            response: RawRecord::new()
                .with(FIELD_RETURN_VALUE, "0")
                .with(FIELD_REBOOT_REQUIRED, "No"),
            failure: None,
            enumerated: Mutex::default(),
            invocations: Mutex::default(),
        }
    }
}

impl MockTransport {
    pub fn with_items(mut self, namespace: &str, records: Vec<RawRecord>) -> Self {
        self.items.entry(namespace.to_owned()).or_default().extend(records);
        self
    }

    pub fn with_response(mut self, response: RawRecord) -> Self {
        self.response = response;
        self
    }

    pub fn with_reboot_required(self, required: bool) -> Self {
        let flag = if required { "Yes" } else { "No" };
        self.with_response(
            RawRecord::new()
                .with(FIELD_RETURN_VALUE, "0")
                .with(FIELD_REBOOT_REQUIRED, flag),
        )
    }

    /// Every call fails with a transport error.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_owned());
        self
    }

    pub fn enumerated(&self) -> Vec<String> {
        self.enumerated.lock().unwrap().clone()
    }

    pub fn invocations(&self) -> Vec<Invocation> {
        self.invocations.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn enumerate(&self, namespace: &str) -> Result<Vec<RawRecord>> {
        self.enumerated.lock().unwrap().push(namespace.to_owned());
        if let Some(message) = &self.failure {
            return Err(Error::TransportFailure(message.clone()));
        }
        Ok(self.items.get(namespace).cloned().unwrap_or_default())
    }

    async fn invoke(
        &self,
        namespace: &str,
        method: &str,
        selectors: &Selectors,
        properties: &Properties,
    ) -> Result<RawRecord> {
        self.invocations.lock().unwrap().push(Invocation {
            namespace: namespace.to_owned(),
            method: method.to_owned(),
            selectors: selectors.clone(),
            properties: properties.clone(),
        });
        if let Some(message) = &self.failure {
            return Err(Error::TransportFailure(message.clone()));
        }
        Ok(self.response.clone())
    }
}

fn base_record(
    fqdd: Option<&str>,
    name: &str,
    current: Option<&str>,
    read_only: bool,
) -> RawRecord {
    let mut record = RawRecord::new()
        .with(FIELD_ATTRIBUTE_NAME, name)
        .with(FIELD_CURRENT_VALUE, current.unwrap_or_default())
        .with(FIELD_PENDING_VALUE, "")
        .with(FIELD_IS_READ_ONLY, if read_only { "true" } else { "false" });
    if let Some(fqdd) = fqdd {
        record.push(FIELD_FQDD, fqdd);
    }
    record
}

pub(crate) fn generic_record(
    fqdd: Option<&str>,
    name: &str,
    current: Option<&str>,
    read_only: bool,
) -> RawRecord {
    base_record(fqdd, name, current, read_only)
}

pub(crate) fn enumeration_record(
    fqdd: Option<&str>,
    name: &str,
    current: Option<&str>,
    read_only: bool,
    possible_values: &[&str],
) -> RawRecord {
    let mut record = base_record(fqdd, name, current, read_only);
    for value in possible_values {
        record.push(FIELD_POSSIBLE_VALUES, *value);
    }
    record
}

pub(crate) fn string_record(
    fqdd: Option<&str>,
    name: &str,
    current: Option<&str>,
    read_only: bool,
    lengths: (i64, i64),
    pattern: Option<&str>,
) -> RawRecord {
    base_record(fqdd, name, current, read_only)
        .with(FIELD_MIN_LENGTH, lengths.0.to_string())
        .with(FIELD_MAX_LENGTH, lengths.1.to_string())
        .with(FIELD_VALUE_EXPRESSION, pattern.unwrap_or_default())
}

pub(crate) fn integer_record(
    fqdd: Option<&str>,
    name: &str,
    current: Option<&str>,
    read_only: bool,
    bounds: (i64, i64),
) -> RawRecord {
    base_record(fqdd, name, current, read_only)
        .with(FIELD_LOWER_BOUND, bounds.0.to_string())
        .with(FIELD_UPPER_BOUND, bounds.1.to_string())
}
