//! BIOS settings. These are global to the system, the controller has no generic
//! BIOS attribute class so only the typed namespaces are queried.

use crate::{
    constants::*,
    data_model::{AttributeKind, Scoping},
};

use super::{Namespace, Service, SettingsFamily};

pub const NAMESPACES: [Namespace<'static>; 3] = [
    Namespace::new(DCIM_BIOS_ENUMERATION, AttributeKind::Enumerable),
    Namespace::new(DCIM_BIOS_STRING, AttributeKind::String),
    Namespace::new(DCIM_BIOS_INTEGER, AttributeKind::Integer),
];

pub const SERVICE: Service<'static> = Service {
    uri: DCIM_BIOS_SERVICE,
    creation_class_name: "DCIM_BIOSService",
    name: "DCIM:BIOSService",
};

pub const FAMILY: SettingsFamily<'static> =
    SettingsFamily::new("BIOS", Scoping::DeviceGlobal, &NAMESPACES, SERVICE);
