//! Writing accepted values as pending values on the controller.

use std::collections::BTreeMap;

use num::FromPrimitive;
use tracing::info;

use crate::{
    constants::*,
    error::{Error, Result},
    settings::Service,
    transport::{Properties, PropertyValue, RawRecord, Selectors, Transport},
};

/// `ReturnValue` of a settings service method
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ReturnValue {
    Completed = 0,
    Failed = 2,
    JobCreated = 4096,
}

impl ReturnValue {
    /// Read and check the return value of a method response.
    pub fn from_response(response: &RawRecord) -> Result<Self> {
        let raw = response.get(FIELD_RETURN_VALUE).ok_or_else(|| {
            Error::InvalidResponse(format!("response has no {FIELD_RETURN_VALUE}"))
        })?;
        let value = raw
            .trim()
            .parse::<u16>()
            .ok()
            .and_then(ReturnValue::from_u16)
            .ok_or_else(|| {
                Error::InvalidResponse(format!("unexpected {FIELD_RETURN_VALUE} '{raw}'"))
            })?;
        match value {
            ReturnValue::Failed => Err(Error::RemoteOperationFailed {
                message: response.get_all(FIELD_MESSAGE).join("\n"),
            }),
            value => Ok(value),
        }
    }
}

/// One `SetAttributes` call. Names and values are positionally aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan<'a> {
    service: Service<'a>,
    target: String,
    names: Vec<String>,
    values: Vec<String>,
}

impl<'a> CommitPlan<'a> {
    /// Plan the write of `accepted` to `target`. Returns `None` when there is nothing to write.
    pub fn new(
        service: Service<'a>,
        target: impl Into<String>,
        accepted: &BTreeMap<String, String>,
    ) -> Option<Self> {
        if accepted.is_empty() {
            return None;
        }
        let (names, values) = accepted
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .unzip();
        Some(Self {
            service,
            target: target.into(),
            names,
            values,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn selectors(&self) -> Selectors {
        self.service.selectors()
    }

    pub fn properties(&self) -> Properties {
        Properties::from([
            (PROPERTY_TARGET.to_owned(), PropertyValue::from(self.target.as_str())),
            (
                PROPERTY_ATTRIBUTE_NAME.to_owned(),
                PropertyValue::from(self.names.clone()),
            ),
            (
                PROPERTY_ATTRIBUTE_VALUE.to_owned(),
                PropertyValue::from(self.values.clone()),
            ),
        ])
    }

    /// Invoke the plan and report whether a configuration job with a reboot is
    /// needed for the pending values to take effect. Transport errors are not retried.
    pub async fn apply<T: Transport>(&self, transport: &T) -> Result<bool> {
        let response = transport
            .invoke(
                self.service.uri,
                SET_ATTRIBUTES_METHOD,
                &self.selectors(),
                &self.properties(),
            )
            .await?;
        let return_value = ReturnValue::from_response(&response)?;
        let commit_required = transport.is_reboot_required(&response, self.service.uri);
        info!(
            device = %self.target,
            attributes = self.names.len(),
            ?return_value,
            commit_required,
            "wrote pending attribute values"
        );
        Ok(commit_required)
    }
}
