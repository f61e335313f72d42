//! Discovering, validating and writing BIOS and NIC settings of a server
//! management controller.
//!
//! Settings are reconciled against the live controller on every call: the
//! catalog of attributes is rebuilt, the proposed values are checked, and only a
//! fully valid change request is written as pending values.

#[macro_use]
extern crate num_derive;

pub mod catalog;
pub mod config;
pub mod constants;
/// Attribute descriptors, parsing and validation
pub mod data_model;
pub mod error;
pub mod reconcile;
/// NIC and BIOS settings families
pub mod settings;
pub mod transport;

use tracing::{debug, warn};

pub use catalog::{CatalogBuilder, SettingsCatalog};
pub use config::{ConfigError, EngineConfig, SettingsConfig};
pub use data_model::{AttributeDescriptor, AttributeKind, AttributeValue, Constraints, Violation};
pub use error::{Error, Rejection, RejectionReport, Result};
pub use reconcile::{commit::CommitPlan, reconcile, ChangeRequest, ReconciliationOutcome};
pub use settings::SettingsFamily;
pub use transport::{RawRecord, Transport};

/// Result of writing settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitOutcome {
    /// A configuration job and a reboot are needed for the written values to apply.
    pub commit_required: bool,
}

/// Settings management over a transport to one controller.
pub struct SettingsClient<T> {
    transport: T,
    engine: EngineConfig,
}

impl<T: Transport> SettingsClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, EngineConfig::default())
    }

    pub fn with_config(transport: T, engine: EngineConfig) -> Self {
        Self { transport, engine }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Every attribute of `family` the device currently exposes, keyed by name.
    pub async fn list_settings(
        &self,
        family: &SettingsFamily<'_>,
        device_instance_id: &str,
    ) -> Result<SettingsCatalog> {
        let catalog = CatalogBuilder::for_family(family)
            .concurrent(self.engine.concurrent_fetch)
            .build(&self.transport, device_instance_id)
            .await?;
        debug!(
            family = family.name,
            device = device_instance_id,
            attributes = catalog.len(),
            "listed settings"
        );
        Ok(catalog)
    }

    /// Classify `request` against the live settings without writing anything.
    pub async fn reconcile_settings(
        &self,
        family: &SettingsFamily<'_>,
        device_instance_id: &str,
        request: &ChangeRequest,
    ) -> Result<ReconciliationOutcome> {
        let catalog = self.list_settings(family, device_instance_id).await?;
        Ok(reconcile(&catalog, request))
    }

    /// Write `request` as pending values.
    ///
    /// Either every changed attribute is written in one call, or nothing is.
    ///
    /// # Errors
    ///
    /// [`Error::Rejected`] lists every unknown, read-only and invalid attribute
    /// of the request. Catalog and transport errors are returned unchanged.
    pub async fn set_settings(
        &self,
        family: &SettingsFamily<'_>,
        device_instance_id: &str,
        request: &ChangeRequest,
    ) -> Result<CommitOutcome> {
        let catalog = self.list_settings(family, device_instance_id).await?;
        let mut outcome = reconcile(&catalog, request);
        let accepted = outcome.accepted_or_rejected()?;

        for name in accepted.keys() {
            if let Some(attribute) = catalog.get(name).filter(|a| a.has_pending_change()) {
                warn!(
                    family = family.name,
                    device = device_instance_id,
                    attribute = %name,
                    pending = ?attribute.pending_value,
                    "overwriting uncommitted pending value"
                );
            }
        }

        let Some(plan) = CommitPlan::new(family.service, device_instance_id, accepted) else {
            return Ok(CommitOutcome {
                commit_required: false,
            });
        };
        outcome.commit_required = plan.apply(&self.transport).await?;
        Ok(CommitOutcome {
            commit_required: outcome.commit_required,
        })
    }

    pub async fn list_nic_settings(&self, fqdd: &str) -> Result<SettingsCatalog> {
        self.list_settings(&settings::nic::FAMILY, fqdd).await
    }

    pub async fn set_nic_settings(
        &self,
        fqdd: &str,
        request: &ChangeRequest,
    ) -> Result<CommitOutcome> {
        self.set_settings(&settings::nic::FAMILY, fqdd, request).await
    }

    pub async fn list_bios_settings(&self) -> Result<SettingsCatalog> {
        self.list_settings(&settings::bios::FAMILY, &self.engine.bios_target)
            .await
    }

    pub async fn set_bios_settings(&self, request: &ChangeRequest) -> Result<CommitOutcome> {
        self.set_settings(&settings::bios::FAMILY, &self.engine.bios_target, request)
            .await
    }
}
