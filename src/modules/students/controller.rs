use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolhub_core::{AppError, MessageResponse};
use schoolhub_models::{CreateStudentDto, Student, StudentWithClassroom, UpdateStudentDto};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{PartialJson, ValidatedJson};

use super::service::StudentService;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 201, description = "Student created successfully", body = Student),
        (status = 400, description = "Validation failed or the store rejected the record", body = schoolhub_core::ValidationErrorResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn create_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = StudentService::create_student(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses(
        (status = 200, description = "All students with their classroom", body = Vec<StudentWithClassroom>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_all_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentWithClassroom>>, AppError> {
    let students = StudentService::get_all_students(state.store.as_ref()).await?;
    Ok(Json(students))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = StudentWithClassroom),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StudentWithClassroom>, AppError> {
    let student = StudentService::get_student_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(student))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    request_body = UpdateStudentDto,
    responses(
        (status = 200, description = "Student updated successfully", body = Student),
        (status = 400, description = "Malformed identifier or field", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn update_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    PartialJson(dto): PartialJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    let student = StudentService::update_student(state.store.as_ref(), &id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse),
        (status = 404, description = "Student not found", body = MessageResponse)
    ),
    tag = "Students",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn delete_student(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    StudentService::delete_student(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        message: "Student deleted successfully".to_string(),
    }))
}
