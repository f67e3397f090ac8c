//! Student domain models and DTOs.

use schoolhub_core::serde::{lenient_int, lenient_string, trimmed_string};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::classrooms::Classroom;
use crate::validation::{InvalidIdentifier, parse_identifier, validate_identifier};

/// A student as stored; `classroom` is the id of its classroom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    #[sqlx(rename = "classroom_id")]
    pub classroom: Uuid,
}

/// A student with its classroom resolved. `classroom` is `null` when it is gone.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentWithClassroom {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub classroom: Option<Classroom>,
}

impl StudentWithClassroom {
    pub fn new(student: Student, classroom: Option<Classroom>) -> Self {
        Self {
            id: student.id,
            first_name: student.first_name,
            last_name: student.last_name,
            age: student.age,
            classroom,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentDto {
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(length(min = 2, message = "First name must be at least 2 characters long"))]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[serde(default, deserialize_with = "trimmed_string")]
    #[validate(length(min = 2, message = "Last name must be at least 2 characters long"))]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_int")]
    #[validate(
        required(message = "Age must be between 5 and 100"),
        range(min = 5, max = 100, message = "Age must be between 5 and 100")
    )]
    #[schema(value_type = i32, example = 12)]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "lenient_string")]
    #[validate(custom(function = "validate_identifier", message = "Invalid Classroom ID format"))]
    pub classroom: String,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub classroom: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidStudent {
    #[error(transparent)]
    Identifier(#[from] InvalidIdentifier),
    #[error("Student validation failed: age: Path `age` is required.")]
    MissingAge,
}

impl TryFrom<CreateStudentDto> for NewStudent {
    type Error = InvalidStudent;

    fn try_from(dto: CreateStudentDto) -> Result<Self, Self::Error> {
        let age = dto
            .age
            .and_then(|age| i32::try_from(age).ok())
            .ok_or(InvalidStudent::MissingAge)?;
        Ok(Self {
            classroom: parse_identifier("classroom", &dto.classroom)?,
            first_name: dto.first_name,
            last_name: dto.last_name,
            age,
        })
    }
}

impl NewStudent {
    pub fn into_student(self, id: Uuid) -> Student {
        Student {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            age: self.age,
            classroom: self.classroom,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStudentDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub classroom: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i32>,
    pub classroom: Option<Uuid>,
}

impl TryFrom<UpdateStudentDto> for StudentChanges {
    type Error = InvalidIdentifier;

    fn try_from(dto: UpdateStudentDto) -> Result<Self, Self::Error> {
        Ok(Self {
            classroom: dto
                .classroom
                .as_deref()
                .map(|classroom| parse_identifier("classroom", classroom))
                .transpose()?,
            first_name: dto.first_name,
            last_name: dto.last_name,
            age: dto.age,
        })
    }
}

impl StudentChanges {
    pub fn apply(self, student: &mut Student) {
        if let Some(first_name) = self.first_name {
            student.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            student.last_name = last_name;
        }
        if let Some(age) = self.age {
            student.age = age;
        }
        if let Some(classroom) = self.classroom {
            student.classroom = classroom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn dto(value: Value) -> CreateStudentDto {
        serde_json::from_value(value).unwrap()
    }

    fn valid_body() -> Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "age": 12,
            "classroom": Uuid::now_v7().to_string(),
        })
    }

    #[test]
    fn test_create_student_dto_validation() {
        assert!(dto(valid_body()).validate().is_ok());
    }

    #[test]
    fn test_age_out_of_range_is_the_only_error() {
        let mut body = valid_body();
        body["age"] = json!(3);
        let errors = dto(body).validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 1);
        assert_eq!(
            fields["age"][0].message.as_deref(),
            Some("Age must be between 5 and 100")
        );
    }

    #[test]
    fn test_age_bounds_are_inclusive() {
        for age in [5, 100] {
            let mut body = valid_body();
            body["age"] = json!(age);
            assert!(dto(body).validate().is_ok());
        }
        for age in [4, 101] {
            let mut body = valid_body();
            body["age"] = json!(age);
            assert!(dto(body).validate().is_err());
        }
    }

    #[test]
    fn test_numeric_string_age_is_accepted() {
        let mut body = valid_body();
        body["age"] = json!("42");
        let student = dto(body);
        assert_eq!(student.age, Some(42));
        assert!(student.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_fail_every_rule() {
        let errors = dto(json!({})).validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 4);
        assert!(fields.contains_key("age"));
        assert!(fields.contains_key("classroom"));
    }

    #[test]
    fn test_new_student_from_dto() {
        let student = NewStudent::try_from(dto(valid_body())).unwrap();
        assert_eq!(student.first_name, "Ada");
        assert_eq!(student.age, 12);
    }

    #[test]
    fn test_changes_reject_malformed_classroom() {
        let err = StudentChanges::try_from(UpdateStudentDto {
            classroom: Some("bad".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.field, "classroom");
    }
}
