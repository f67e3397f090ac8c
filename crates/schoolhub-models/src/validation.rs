//! Identifier rules.
//!
//! Every record is keyed by a UUID. Create payloads check reference fields with
//! [`validate_identifier`]; everything else converts with [`parse_identifier`], whose
//! error names the field and the offending value.

use std::borrow::Cow;

use uuid::Uuid;
use validator::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Cast to identifier failed for value \"{value}\" at path \"{field}\"")]
pub struct InvalidIdentifier {
    pub field: &'static str,
    pub value: String,
}

pub fn parse_identifier(field: &'static str, value: &str) -> Result<Uuid, InvalidIdentifier> {
    Uuid::parse_str(value).map_err(|_| InvalidIdentifier {
        field,
        value: value.to_string(),
    })
}

pub fn validate_identifier(value: &str) -> Result<(), ValidationError> {
    match Uuid::parse_str(value) {
        Ok(_) => Ok(()),
        Err(_) => Err(ValidationError::new("identifier")
            .with_message(Cow::Borrowed("Invalid identifier format"))),
    }
}
