//! Classroom domain models and DTOs.

use schoolhub_core::serde::{lenient_string, trimmed_string};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::students::Student;
use crate::validation::{InvalidIdentifier, parse_identifier, validate_identifier};

/// A classroom as stored; `school` is the id of its school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub id: Uuid,
    pub name: String,
    #[sqlx(rename = "school_id")]
    pub school: Uuid,
}

/// A classroom together with every student whose `classroom` points at it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomWithStudents {
    pub id: Uuid,
    pub name: String,
    pub school: Uuid,
    pub students: Vec<Student>,
}

impl ClassroomWithStudents {
    pub fn new(classroom: Classroom, students: Vec<Student>) -> Self {
        Self {
            id: classroom.id,
            name: classroom.name,
            school: classroom.school,
            students,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassroomDto {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(length(min = 3, message = "Classroom name must be at least 3 characters long"))]
    #[schema(example = "Room 101")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(custom(function = "validate_identifier", message = "Invalid School ID format"))]
    pub school: String,
}

#[derive(Debug, Clone)]
pub struct NewClassroom {
    pub name: String,
    pub school: Uuid,
}

impl TryFrom<CreateClassroomDto> for NewClassroom {
    type Error = InvalidIdentifier;

    fn try_from(dto: CreateClassroomDto) -> Result<Self, Self::Error> {
        Ok(Self {
            school: parse_identifier("school", &dto.school)?,
            name: dto.name,
        })
    }
}

impl NewClassroom {
    pub fn into_classroom(self, id: Uuid) -> Classroom {
        Classroom {
            id,
            name: self.name,
            school: self.school,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassroomDto {
    pub name: Option<String>,
    pub school: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassroomChanges {
    pub name: Option<String>,
    pub school: Option<Uuid>,
}

impl TryFrom<UpdateClassroomDto> for ClassroomChanges {
    type Error = InvalidIdentifier;

    fn try_from(dto: UpdateClassroomDto) -> Result<Self, Self::Error> {
        Ok(Self {
            school: dto
                .school
                .as_deref()
                .map(|school| parse_identifier("school", school))
                .transpose()?,
            name: dto.name,
        })
    }
}

impl ClassroomChanges {
    pub fn apply(self, classroom: &mut Classroom) {
        if let Some(name) = self.name {
            classroom.name = name;
        }
        if let Some(school) = self.school {
            classroom.school = school;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_classroom_dto_validation() {
        let valid: CreateClassroomDto = serde_json::from_value(json!({
            "name": "Room 101",
            "school": Uuid::now_v7().to_string(),
        }))
        .unwrap();
        assert!(valid.validate().is_ok());

        let invalid: CreateClassroomDto =
            serde_json::from_value(json!({ "name": " ab ", "school": 42 })).unwrap();
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(
            fields["name"][0].message.as_deref(),
            Some("Classroom name must be at least 3 characters long")
        );
        assert_eq!(
            fields["school"][0].message.as_deref(),
            Some("Invalid School ID format")
        );
    }

    #[test]
    fn test_populated_classroom_serializes_students() {
        let classroom = Classroom {
            id: Uuid::now_v7(),
            name: "Room 101".to_string(),
            school: Uuid::now_v7(),
        };
        let value = serde_json::to_value(ClassroomWithStudents::new(classroom, vec![])).unwrap();
        assert_eq!(value["students"], json!([]));
        assert_eq!(value["name"], "Room 101");
    }
}
