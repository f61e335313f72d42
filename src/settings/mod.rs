use crate::{
    constants::*,
    data_model::{AttributeKind, Scoping},
    transport::Selectors,
};

pub mod bios;
pub mod nic;

/// A constraint namespace and the kind of attribute it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace<'a> {
    pub uri: &'a str,
    pub kind: AttributeKind,
}

impl<'a> Namespace<'a> {
    pub const fn new(uri: &'a str, kind: AttributeKind) -> Self {
        Self { uri, kind }
    }
}

/// The service instance `SetAttributes` is invoked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Service<'a> {
    pub uri: &'a str,
    pub creation_class_name: &'a str,
    pub name: &'a str,
}

impl<'a> Service<'a> {
    pub fn selectors(&self) -> Selectors {
        Selectors::from([
            (
                SELECTOR_CREATION_CLASS_NAME.to_owned(),
                self.creation_class_name.to_owned(),
            ),
            (SELECTOR_NAME.to_owned(), self.name.to_owned()),
            (
                SELECTOR_SYSTEM_CREATION_CLASS_NAME.to_owned(),
                COMPUTER_SYSTEM_CLASS.to_owned(),
            ),
            (
                SELECTOR_SYSTEM_NAME.to_owned(),
                COMPUTER_SYSTEM_NAME.to_owned(),
            ),
        ])
    }
}

/// A group of settings the controller exposes through one service, e.g. NIC or BIOS.
#[derive(Debug, Clone, Copy)]
pub struct SettingsFamily<'a> {
    pub name: &'a str,
    pub scoping: Scoping,
    /// Queried in this order, merged without collisions
    pub namespaces: &'a [Namespace<'a>],
    pub service: Service<'a>,
}

impl<'a> SettingsFamily<'a> {
    pub const fn new(
        name: &'a str,
        scoping: Scoping,
        namespaces: &'a [Namespace<'a>],
        service: Service<'a>,
    ) -> Self {
        Self {
            name,
            scoping,
            namespaces,
            service,
        }
    }
}
