use tracing::warn;

use crate::{
    constants::*,
    error::{Error, Result},
    transport::RawRecord,
};

use super::{AttributeDescriptor, AttributeKind, AttributeValue, Constraints, Pattern, Scoping};

/// Reads the fields of one record of a constraint namespace.
struct FieldReader<'a> {
    record: &'a RawRecord,
    namespace: &'a str,
    name: Option<&'a str>,
}

impl<'a> FieldReader<'a> {
    fn malformed(&self, reason: impl Into<String>) -> Error {
        Error::malformed(self.namespace, self.name, reason)
    }

    fn required(&self, field: &str) -> Result<&'a str> {
        self.record
            .get(field)
            .ok_or_else(|| self.malformed(format!("missing field {field}")))
    }

    fn optional(&self, field: &str) -> Option<&'a str> {
        self.record.get(field)
    }

    fn integer(&self, field: &str, value: &str) -> Result<i64> {
        value
            .trim()
            .parse()
            .map_err(|_| self.malformed(format!("{field} is not an integer: '{value}'")))
    }

    fn required_integer(&self, field: &str) -> Result<i64> {
        let value = self.required(field)?;
        self.integer(field, value)
    }

    fn optional_integer(&self, field: &str) -> Result<Option<AttributeValue>> {
        self.optional(field)
            .map(|value| self.integer(field, value).map(AttributeValue::Integer))
            .transpose()
    }

    fn optional_text(&self, field: &str) -> Option<AttributeValue> {
        self.optional(field)
            .map(|value| AttributeValue::Text(value.to_owned()))
    }
}

impl AttributeDescriptor {
    /// Build a descriptor from a record of a constraint namespace of the given kind.
    ///
    /// Reported values of integer attributes are converted here, so a controller
    /// reporting a non-integer current value fails with
    /// [`Error::MalformedAttribute`] rather than at validation time.
    pub fn from_record(
        record: &RawRecord,
        kind: AttributeKind,
        namespace: &str,
        scoping: Scoping,
    ) -> Result<Self> {
        let mut reader = FieldReader {
            record,
            namespace,
            name: None,
        };
        let name = reader.required(FIELD_ATTRIBUTE_NAME)?;
        reader.name = Some(name);

        let device_instance_id = match scoping {
            Scoping::DeviceGlobal => reader.optional(FIELD_FQDD),
            Scoping::PerInstance => Some(reader.required(FIELD_FQDD)?),
        }
        .map(str::to_owned);
        let read_only = reader
            .required(FIELD_IS_READ_ONLY)?
            .eq_ignore_ascii_case("true");

        let (current_value, pending_value) = match kind {
            AttributeKind::Integer => (
                reader.optional_integer(FIELD_CURRENT_VALUE)?,
                reader.optional_integer(FIELD_PENDING_VALUE)?,
            ),
            _ => (
                reader.optional_text(FIELD_CURRENT_VALUE),
                reader.optional_text(FIELD_PENDING_VALUE),
            ),
        };

        let constraints = match kind {
            AttributeKind::Generic => Constraints::Generic,
            AttributeKind::Enumerable => Constraints::Enumerable {
                possible_values: record
                    .get_all(FIELD_POSSIBLE_VALUES)
                    .iter()
                    .filter(|value| !value.is_empty())
                    .cloned()
                    .collect(),
            },
            AttributeKind::String => Constraints::String {
                min_length: reader.required_integer(FIELD_MIN_LENGTH)?,
                max_length: reader.required_integer(FIELD_MAX_LENGTH)?,
                pattern: reader.optional(FIELD_VALUE_EXPRESSION).map(|source| {
                    let pattern = Pattern::new(source);
                    if !pattern.is_supported() {
                        warn!(
                            namespace,
                            attribute = name,
                            pattern = source,
                            "value expression cannot be evaluated"
                        );
                    }
                    pattern
                }),
            },
            AttributeKind::Integer => Constraints::Integer {
                lower_bound: reader.required_integer(FIELD_LOWER_BOUND)?,
                upper_bound: reader.required_integer(FIELD_UPPER_BOUND)?,
            },
        };

        Ok(Self {
            device_instance_id,
            name: name.to_owned(),
            current_value,
            pending_value,
            read_only,
            constraints,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::transport::mock::*;

    use super::*;

    const FQDD: &str = "NIC.Integrated.1-1-1";

    fn parse(record: &RawRecord, kind: AttributeKind) -> Result<AttributeDescriptor> {
        AttributeDescriptor::from_record(record, kind, DCIM_NIC_INTEGER, Scoping::PerInstance)
    }

    #[test]
    fn test_parse_generic() {
        let record = generic_record(Some(FQDD), "LinkStatus", Some("Connected"), true);
        let attribute = parse(&record, AttributeKind::Generic).unwrap();
        assert_eq!(
            attribute,
            AttributeDescriptor {
                device_instance_id: Some(FQDD.into()),
                name: "LinkStatus".into(),
                current_value: Some(AttributeValue::Text("Connected".into())),
                pending_value: None,
                read_only: true,
                constraints: Constraints::Generic,
            }
        );
    }

    #[test]
    fn test_parse_enumeration_keeps_order() {
        let record = enumeration_record(
            Some(FQDD),
            "LegacyBootProto",
            Some("PXE"),
            false,
            &["PXE", "iSCSI", "NONE"],
        );
        let attribute = parse(&record, AttributeKind::Enumerable).unwrap();
        assert_eq!(
            attribute.constraints,
            Constraints::Enumerable {
                possible_values: vec!["PXE".into(), "iSCSI".into(), "NONE".into()],
            }
        );
        assert!(!attribute.read_only);
    }

    #[test]
    fn test_parse_string_without_pattern() {
        let record = string_record(Some(FQDD), "ChapMutualAuth", None, false, (0, 16), None);
        let attribute = parse(&record, AttributeKind::String).unwrap();
        assert_eq!(attribute.current_value, None);
        assert_eq!(
            attribute.constraints,
            Constraints::String {
                min_length: 0,
                max_length: 16,
                pattern: None,
            }
        );
    }

    #[test]
    fn test_parse_string_unsupported_pattern() {
        let record = string_record(
            Some(FQDD),
            "IscsiName",
            None,
            false,
            (0, 16),
            Some(r"^(?!\s).*$"),
        );
        let attribute = parse(&record, AttributeKind::String).unwrap();
        match attribute.constraints {
            Constraints::String {
                pattern: Some(pattern),
                ..
            } => {
                assert_eq!(pattern.as_str(), r"^(?!\s).*$");
                assert!(!pattern.is_supported());
            }
            c => panic!("unexpected constraints {c:?}"),
        }

        let record = string_record(Some(FQDD), "IscsiName", None, false, (0, 16), Some("(["));
        assert!(parse(&record, AttributeKind::String).is_ok());
    }

    #[test]
    fn test_parse_integer_converts_values() {
        let mut record = integer_record(Some(FQDD), "BlnkLeds", Some("0"), false, (0, 15));
        record.push(FIELD_PENDING_VALUE, "");
        let attribute = parse(&record, AttributeKind::Integer).unwrap();
        assert_eq!(attribute.current_value, Some(AttributeValue::Integer(0)));
        assert_eq!(attribute.pending_value, None);
        assert_eq!(
            attribute.constraints,
            Constraints::Integer {
                lower_bound: 0,
                upper_bound: 15,
            }
        );
    }

    #[test]
    fn test_parse_integer_malformed_current_value() {
        let record = integer_record(Some(FQDD), "BlnkLeds", Some("fast"), false, (0, 15));
        let err = parse(&record, AttributeKind::Integer).unwrap_err();
        match err {
            Error::MalformedAttribute { name, reason, .. } => {
                assert_eq!(name.as_deref(), Some("BlnkLeds"));
                assert!(reason.contains("CurrentValue"), "{reason}");
            }
            e => panic!("unexpected error {e}"),
        }
    }

    #[test]
    fn test_parse_integer_malformed_bound() {
        let record = RawRecord::new()
            .with(FIELD_FQDD, FQDD)
            .with(FIELD_ATTRIBUTE_NAME, "VLanId")
            .with(FIELD_IS_READ_ONLY, "false")
            .with(FIELD_LOWER_BOUND, "one")
            .with(FIELD_UPPER_BOUND, "4095");
        assert!(parse(&record, AttributeKind::Integer).is_err());
    }

    #[test]
    fn test_parse_missing_name() {
        let record = RawRecord::new().with(FIELD_IS_READ_ONLY, "false");
        let err = parse(&record, AttributeKind::Generic).unwrap_err();
        assert!(err.to_string().contains("AttributeName"), "{err}");
    }

    #[test]
    fn test_parse_fqdd_scoping() {
        let record = generic_record(None, "SysProfile", Some("PerfOptimized"), false);
        assert!(parse(&record, AttributeKind::Generic).is_err());

        let attribute = AttributeDescriptor::from_record(
            &record,
            AttributeKind::Generic,
            DCIM_BIOS_ENUMERATION,
            Scoping::DeviceGlobal,
        )
        .unwrap();
        assert_eq!(attribute.device_instance_id, None);
    }
}
