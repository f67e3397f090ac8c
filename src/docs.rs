use schoolhub_auth::Role;
use schoolhub_core::{FallbackErrorResponse, FieldError, MessageResponse, ValidationErrorResponse};
use schoolhub_models::{
    Classroom, ClassroomWithStudents, CreateClassroomDto, CreateSchoolDto, CreateStudentDto,
    School, SchoolWithAdmin, Student, StudentWithClassroom, UpdateClassroomDto, UpdateSchoolDto,
    UpdateStudentDto, User,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_all_schools,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::classrooms::controller::create_classroom,
        crate::modules::classrooms::controller::get_all_classrooms,
        crate::modules::classrooms::controller::get_classroom,
        crate::modules::classrooms::controller::update_classroom,
        crate::modules::classrooms::controller::delete_classroom,
        crate::modules::students::controller::create_student,
        crate::modules::students::controller::get_all_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::delete_student,
    ),
    components(
        schemas(
            Role,
            User,
            School,
            SchoolWithAdmin,
            CreateSchoolDto,
            UpdateSchoolDto,
            Classroom,
            ClassroomWithStudents,
            CreateClassroomDto,
            UpdateClassroomDto,
            Student,
            StudentWithClassroom,
            CreateStudentDto,
            UpdateStudentDto,
            MessageResponse,
            FieldError,
            ValidationErrorResponse,
            FallbackErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Schools", description = "School management; mutations require the superadmin role"),
        (name = "Classrooms", description = "Classroom management; mutations require the admin role"),
        (name = "Students", description = "Student management; mutations require the admin role"),
    ),
    info(
        title = "SchoolHub API",
        version = "0.1.0",
        description = "School management REST API. Every /api route expects `Authorization: Bearer <token>`.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        assert_eq!(paths.len(), 6);
        for path in [
            "/api/schools",
            "/api/schools/{id}",
            "/api/classrooms/{id}",
            "/api/students",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_bearer_scheme_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.unwrap();
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}
