//! # SchoolHub Models
//!
//! Domain records, request DTOs and their validation rules.
//!
//! - [`schools`]: School records, create/update payloads
//! - [`classrooms`]: Classroom records, create/update payloads
//! - [`students`]: Student records, create/update payloads
//! - [`users`]: the identities a School's `admin` points at
//! - [`validation`]: identifier parsing shared by every resource
//!
//! Records come in two forms: the stored one, where references are plain ids, and
//! the populated one returned by reads, where the reference is replaced by the
//! referenced record (or `null` when it no longer exists).

pub mod classrooms;
pub mod schools;
pub mod students;
pub mod users;
pub mod validation;

pub use classrooms::{
    Classroom, ClassroomChanges, ClassroomWithStudents, CreateClassroomDto, NewClassroom,
    UpdateClassroomDto,
};
pub use schools::{
    CreateSchoolDto, NewSchool, School, SchoolChanges, SchoolWithAdmin, UpdateSchoolDto,
};
pub use students::{
    CreateStudentDto, InvalidStudent, NewStudent, Student, StudentChanges, StudentWithClassroom,
    UpdateStudentDto,
};
pub use users::{NewUser, User};
pub use validation::{InvalidIdentifier, parse_identifier, validate_identifier};
