//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout SmartSched.
//! Each identifier is a distinct type — you cannot pass a [`ClassId`]
//! where a [`StudentId`] is expected.
//!
//! ## Validation
//!
//! All three identifiers are string-based and validate non-emptiness at
//! construction time. The seeded roster uses the original registrar
//! conventions (`S001`, `F01`, `C01`) but the format is not enforced —
//! institutions bring their own ID schemes.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

macro_rules! string_id {
    ($name:ident, $kind:literal, $doc:literal) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier, rejecting empty or whitespace-only input.
            pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
                let raw = raw.into();
                if raw.trim().is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(raw))
            }

            /// Access the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

string_id!(
    StudentId,
    "student",
    "A unique identifier for a registered student."
);
string_id!(
    ClassId,
    "class",
    "A unique identifier for a class section."
);
string_id!(
    FacultyId,
    "faculty",
    "A unique identifier for a faculty member."
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_registrar_style_ids() {
        let id = StudentId::new("S001").unwrap();
        assert_eq!(id.as_str(), "S001");
        assert_eq!(id.to_string(), "S001");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(StudentId::new("").is_err());
        assert!(ClassId::new("   ").is_err());
        assert!(FacultyId::new("\t").is_err());
    }

    #[test]
    fn serde_is_transparent() {
        let id = ClassId::new("C01").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"C01\"");
        let back: ClassId = serde_json::from_str("\"C01\"").unwrap();
        assert_eq!(back, id);
    }
}
