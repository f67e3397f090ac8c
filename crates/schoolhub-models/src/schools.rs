//! School domain models and DTOs.

use schoolhub_core::serde::{lenient_string, trimmed_string};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::users::User;
use crate::validation::{InvalidIdentifier, parse_identifier, validate_identifier};

/// A school as stored; `admin` is the id of a [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    #[sqlx(rename = "admin_id")]
    pub admin: Uuid,
}

/// A school with its admin resolved. `admin` is `null` when the user is gone.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SchoolWithAdmin {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub admin: Option<User>,
}

impl SchoolWithAdmin {
    pub fn new(school: School, admin: Option<User>) -> Self {
        Self {
            id: school.id,
            name: school.name,
            address: school.address,
            admin,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolDto {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(length(min = 5, message = "School name must be at least 5 characters long"))]
    #[schema(example = "Lincoln High School")]
    pub name: String,
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(length(min = 10, message = "Address must be at least 10 characters long"))]
    #[schema(example = "123 Main Street, Springfield")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(custom(function = "validate_identifier", message = "Invalid Admin ID format"))]
    pub admin: String,
}

/// Validated input for a new school.
#[derive(Debug, Clone)]
pub struct NewSchool {
    pub name: String,
    pub address: String,
    pub admin: Uuid,
}

impl TryFrom<CreateSchoolDto> for NewSchool {
    type Error = InvalidIdentifier;

    fn try_from(dto: CreateSchoolDto) -> Result<Self, Self::Error> {
        Ok(Self {
            admin: parse_identifier("admin", &dto.admin)?,
            name: dto.name,
            address: dto.address,
        })
    }
}

impl NewSchool {
    pub fn into_school(self, id: Uuid) -> School {
        School {
            id,
            name: self.name,
            address: self.address,
            admin: self.admin,
        }
    }
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolDto {
    pub name: Option<String>,
    pub address: Option<String>,
    pub admin: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchoolChanges {
    pub name: Option<String>,
    pub address: Option<String>,
    pub admin: Option<Uuid>,
}

impl TryFrom<UpdateSchoolDto> for SchoolChanges {
    type Error = InvalidIdentifier;

    fn try_from(dto: UpdateSchoolDto) -> Result<Self, Self::Error> {
        Ok(Self {
            admin: dto
                .admin
                .as_deref()
                .map(|admin| parse_identifier("admin", admin))
                .transpose()?,
            name: dto.name,
            address: dto.address,
        })
    }
}

impl SchoolChanges {
    pub fn apply(self, school: &mut School) {
        if let Some(name) = self.name {
            school.name = name;
        }
        if let Some(address) = self.address {
            school.address = address;
        }
        if let Some(admin) = self.admin {
            school.admin = admin;
        }
    }
}
