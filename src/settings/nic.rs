//! NIC settings, one catalog per network interface (FQDD).

use crate::{
    constants::*,
    data_model::{AttributeKind, Scoping},
};

use super::{Namespace, Service, SettingsFamily};

pub const NAMESPACES: [Namespace<'static>; 4] = [
    Namespace::new(DCIM_NIC_ATTRIBUTE, AttributeKind::Generic),
    Namespace::new(DCIM_NIC_ENUMERATION, AttributeKind::Enumerable),
    Namespace::new(DCIM_NIC_STRING, AttributeKind::String),
    Namespace::new(DCIM_NIC_INTEGER, AttributeKind::Integer),
];

pub const SERVICE: Service<'static> = Service {
    uri: DCIM_NIC_SERVICE,
    creation_class_name: "DCIM_NICService",
    name: "DCIM:NICService",
};

pub const FAMILY: SettingsFamily<'static> =
    SettingsFamily::new("NIC", Scoping::PerInstance, &NAMESPACES, SERVICE);
