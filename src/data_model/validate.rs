use thiserror::Error;

use super::{AttributeDescriptor, Constraints};

/// Why a proposed value does not fit an attribute. The message is the
/// diagnostic shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("Attribute '{name}' cannot be set to value '{value}'. It must be in {allowed:?}.")]
    NotAllowed {
        name: String,
        value: String,
        allowed: Vec<String>,
    },
    #[error("Attribute '{name}' cannot be set to value '{value}'. It must match regex '{pattern}'.")]
    PatternMismatch {
        name: String,
        value: String,
        pattern: String,
    },
    #[error("Attribute '{name}' cannot be set to value {value}. It must be between {lower} and {upper}.")]
    OutOfBounds {
        name: String,
        value: i64,
        lower: i64,
        upper: i64,
    },
    /// The attribute's expression uses syntax that cannot be evaluated here,
    /// e.g. look-around or backreferences.
    #[error("Attribute '{name}' cannot be set to value '{value}'. Its regex '{pattern}' cannot be evaluated: {reason}")]
    UnsupportedPattern {
        name: String,
        value: String,
        pattern: String,
        reason: String,
    },
    /// The proposed value cannot be read as the attribute's type at all.
    #[error("Attribute '{name}' cannot be set to value '{value}'. It must be an integer.")]
    MalformedValue { name: String, value: String },
}

impl AttributeDescriptor {
    /// Check `candidate` against the constraints of this attribute.
    ///
    /// Only the constraints are checked here. Unknown names, read-only attributes
    /// and unchanged values are decided by the reconciler before this is called.
    /// String attributes are only checked against their pattern, the reported
    /// minimum and maximum lengths are informational.
    pub fn validate(&self, candidate: &str) -> Result<(), Violation> {
        match &self.constraints {
            Constraints::Generic => Ok(()),
            Constraints::Enumerable { possible_values } => {
                if possible_values.iter().any(|allowed| allowed == candidate) {
                    Ok(())
                } else {
                    Err(Violation::NotAllowed {
                        name: self.name.clone(),
                        value: candidate.to_owned(),
                        allowed: possible_values.clone(),
                    })
                }
            }
            Constraints::String { pattern: None, .. } => Ok(()),
            Constraints::String {
                pattern: Some(pattern),
                ..
            } => match pattern.is_match(candidate) {
                Ok(true) => Ok(()),
                Ok(false) => Err(Violation::PatternMismatch {
                    name: self.name.clone(),
                    value: candidate.to_owned(),
                    pattern: pattern.as_str().to_owned(),
                }),
                Err(e) => Err(Violation::UnsupportedPattern {
                    name: self.name.clone(),
                    value: candidate.to_owned(),
                    pattern: pattern.as_str().to_owned(),
                    reason: e.to_string(),
                }),
            },
            Constraints::Integer {
                lower_bound,
                upper_bound,
            } => {
                let value: i64 =
                    candidate
                        .trim()
                        .parse()
                        .map_err(|_| Violation::MalformedValue {
                            name: self.name.clone(),
                            value: candidate.to_owned(),
                        })?;
                if (*lower_bound..=*upper_bound).contains(&value) {
                    Ok(())
                } else {
                    Err(Violation::OutOfBounds {
                        name: self.name.clone(),
                        value,
                        lower: *lower_bound,
                        upper: *upper_bound,
                    })
                }
            }
        }
    }
}
