//! All the constants used when talking to the controller.
//! Namespaces are the DCIM class resource URIs exposed over WS-Man.

macro_rules! dcim_uri {
    ($class:literal) => {
        concat!("http://schemas.dell.com/wbem/wscim/1/cim-schema/2/", $class)
    };
}

// NIC (per interface, scoped by FQDD)
pub const DCIM_NIC_ATTRIBUTE: &str = dcim_uri!("DCIM_NICAttribute");
pub const DCIM_NIC_ENUMERATION: &str = dcim_uri!("DCIM_NICEnumeration");
pub const DCIM_NIC_STRING: &str = dcim_uri!("DCIM_NICString");
pub const DCIM_NIC_INTEGER: &str = dcim_uri!("DCIM_NICInteger");
pub const DCIM_NIC_SERVICE: &str = dcim_uri!("DCIM_NICService");

// BIOS (device global)
pub const DCIM_BIOS_ENUMERATION: &str = dcim_uri!("DCIM_BIOSEnumeration");
pub const DCIM_BIOS_STRING: &str = dcim_uri!("DCIM_BIOSString");
pub const DCIM_BIOS_INTEGER: &str = dcim_uri!("DCIM_BIOSInteger");
pub const DCIM_BIOS_SERVICE: &str = dcim_uri!("DCIM_BIOSService");

/// Target of BIOS `SetAttributes` calls.
pub const BIOS_DEVICE_FQDD: &str = "BIOS.Setup.1-1";

/// The method invoked on a settings service to write pending values.
pub const SET_ATTRIBUTES_METHOD: &str = "SetAttributes";

// Service selectors
pub const SELECTOR_CREATION_CLASS_NAME: &str = "CreationClassName";
pub const SELECTOR_NAME: &str = "Name";
pub const SELECTOR_SYSTEM_CREATION_CLASS_NAME: &str = "SystemCreationClassName";
pub const SELECTOR_SYSTEM_NAME: &str = "SystemName";
pub const COMPUTER_SYSTEM_CLASS: &str = "DCIM_ComputerSystem";
pub const COMPUTER_SYSTEM_NAME: &str = "DCIM:ComputerSystem";

// Record fields shared by every attribute class
pub const FIELD_FQDD: &str = "FQDD";
pub const FIELD_ATTRIBUTE_NAME: &str = "AttributeName";
pub const FIELD_CURRENT_VALUE: &str = "CurrentValue";
pub const FIELD_PENDING_VALUE: &str = "PendingValue";
pub const FIELD_IS_READ_ONLY: &str = "IsReadOnly";
// Enumeration
pub const FIELD_POSSIBLE_VALUES: &str = "PossibleValues";
// String
pub const FIELD_MIN_LENGTH: &str = "MinLength";
pub const FIELD_MAX_LENGTH: &str = "MaxLength";
pub const FIELD_VALUE_EXPRESSION: &str = "ValueExpression";
// Integer
pub const FIELD_LOWER_BOUND: &str = "LowerBound";
pub const FIELD_UPPER_BOUND: &str = "UpperBound";

// SetAttributes input properties
pub const PROPERTY_TARGET: &str = "Target";
pub const PROPERTY_ATTRIBUTE_NAME: &str = "AttributeName";
pub const PROPERTY_ATTRIBUTE_VALUE: &str = "AttributeValue";

// Method output
pub const FIELD_RETURN_VALUE: &str = "ReturnValue";
pub const FIELD_MESSAGE: &str = "Message";
pub const FIELD_REBOOT_REQUIRED: &str = "RebootRequired";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dcim_uris() {
        assert_eq!(
            DCIM_NIC_SERVICE,
            "http://schemas.dell.com/wbem/wscim/1/cim-schema/2/DCIM_NICService"
        );
        assert!(DCIM_BIOS_INTEGER.ends_with("/DCIM_BIOSInteger"));
    }
}
