//! Building the catalog of settings a device currently exposes.

use std::collections::{btree_map, BTreeMap};

use futures_util::future::try_join_all;
use tracing::debug;

use crate::{
    data_model::{AttributeDescriptor, Scoping},
    error::{Error, Result},
    settings::{Namespace, SettingsFamily},
    transport::Transport,
};

type AttributeSet = BTreeMap<String, AttributeDescriptor>;

/// Every attribute of one device, keyed by name. Each name is owned by exactly
/// one constraint namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsCatalog {
    device_instance_id: String,
    attributes: AttributeSet,
}

impl SettingsCatalog {
    pub fn new(device_instance_id: impl Into<String>) -> Self {
        Self {
            device_instance_id: device_instance_id.into(),
            attributes: AttributeSet::new(),
        }
    }

    /// Build a catalog from attributes already in hand, failing on duplicate names.
    pub fn from_attributes(
        device_instance_id: impl Into<String>,
        attributes: impl IntoIterator<Item = AttributeDescriptor>,
    ) -> Result<Self> {
        let mut catalog = Self::new(device_instance_id);
        for attribute in attributes {
            catalog.merge(AttributeSet::from([(attribute.name.clone(), attribute)]))?;
        }
        Ok(catalog)
    }

    pub fn device_instance_id(&self) -> &str {
        &self.device_instance_id
    }

    pub fn get(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, AttributeDescriptor> {
        self.attributes.iter()
    }

    pub fn into_attributes(self) -> BTreeMap<String, AttributeDescriptor> {
        self.attributes
    }

    /// Insert-or-fail. Nothing is inserted when any name of `set` is already present.
    fn merge(&mut self, set: AttributeSet) -> Result<()> {
        let colliding: Vec<String> = set
            .keys()
            .filter(|name| self.attributes.contains_key(*name))
            .cloned()
            .collect();
        if !colliding.is_empty() {
            return Err(Error::AttributeCollision { names: colliding });
        }
        self.attributes.extend(set);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SettingsCatalog {
    type Item = (&'a String, &'a AttributeDescriptor);
    type IntoIter = btree_map::Iter<'a, String, AttributeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Queries an ordered list of constraint namespaces and merges what they report.
#[derive(Debug, Clone)]
pub struct CatalogBuilder<'a> {
    namespaces: &'a [Namespace<'a>],
    scoping: Scoping,
    concurrent: bool,
}

impl<'a> CatalogBuilder<'a> {
    pub fn new(namespaces: &'a [Namespace<'a>], scoping: Scoping) -> Self {
        Self {
            namespaces,
            scoping,
            concurrent: true,
        }
    }

    pub fn for_family(family: &SettingsFamily<'a>) -> Self {
        Self::new(family.namespaces, family.scoping)
    }

    /// Enumerate all namespaces at once. The results are still merged in
    /// namespace order, after every fetch has completed.
    pub fn concurrent(mut self, concurrent: bool) -> Self {
        self.concurrent = concurrent;
        self
    }

    /// Build the catalog of `device_instance_id`.
    ///
    /// For per-instance families only records of that device are kept. Device
    /// global families report no instance and keep every record.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::AttributeCollision`] when a name is reported by more
    /// than one namespace, or more than once by the same namespace. Parse and
    /// transport errors are returned unchanged.
    pub async fn build<T: Transport>(
        &self,
        transport: &T,
        device_instance_id: &str,
    ) -> Result<SettingsCatalog> {
        let sets = if self.concurrent {
            try_join_all(
                self.namespaces
                    .iter()
                    .map(|namespace| self.fetch(transport, namespace, device_instance_id)),
            )
            .await?
        } else {
            let mut sets = Vec::with_capacity(self.namespaces.len());
            for namespace in self.namespaces {
                sets.push(self.fetch(transport, namespace, device_instance_id).await?);
            }
            sets
        };

        let mut catalog = SettingsCatalog::new(device_instance_id);
        for set in sets {
            catalog.merge(set)?;
        }
        Ok(catalog)
    }

    async fn fetch<T: Transport>(
        &self,
        transport: &T,
        namespace: &Namespace<'_>,
        device_instance_id: &str,
    ) -> Result<AttributeSet> {
        let items = transport.enumerate(namespace.uri).await?;
        let mut set = AttributeSet::new();
        for item in &items {
            let attribute =
                AttributeDescriptor::from_record(item, namespace.kind, namespace.uri, self.scoping)?;
            if self.scoping == Scoping::PerInstance
                && attribute.device_instance_id.as_deref() != Some(device_instance_id)
            {
                continue;
            }
            if set.contains_key(&attribute.name) {
                return Err(Error::AttributeCollision {
                    names: vec![attribute.name],
                });
            }
            set.insert(attribute.name.clone(), attribute);
        }
        debug!(
            namespace = namespace.uri,
            items = items.len(),
            kept = set.len(),
            "enumerated attribute namespace"
        );
        Ok(set)
    }
}
