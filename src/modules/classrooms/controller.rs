use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolhub_core::{AppError, MessageResponse};
use schoolhub_models::{Classroom, ClassroomWithStudents, CreateClassroomDto, UpdateClassroomDto};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{PartialJson, ValidatedJson};

use super::service::ClassroomService;

#[utoipa::path(
    post,
    path = "/api/classrooms",
    request_body = CreateClassroomDto,
    responses(
        (status = 201, description = "Classroom created successfully", body = Classroom),
        (status = 400, description = "Validation failed or the store rejected the record", body = schoolhub_core::ValidationErrorResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn create_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateClassroomDto>,
) -> Result<(StatusCode, Json<Classroom>), AppError> {
    let classroom = ClassroomService::create_classroom(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(classroom)))
}

#[utoipa::path(
    get,
    path = "/api/classrooms",
    responses(
        (status = 200, description = "All classrooms with their students", body = Vec<ClassroomWithStudents>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn get_all_classrooms(
    State(state): State<AppState>,
) -> Result<Json<Vec<ClassroomWithStudents>>, AppError> {
    let classrooms = ClassroomService::get_all_classrooms(state.store.as_ref()).await?;
    Ok(Json(classrooms))
}

#[utoipa::path(
    get,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID")
    ),
    responses(
        (status = 200, description = "Classroom details", body = ClassroomWithStudents),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "Classroom not found", body = MessageResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
pub async fn get_classroom(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ClassroomWithStudents>, AppError> {
    let classroom = ClassroomService::get_classroom_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    put,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID")
    ),
    request_body = UpdateClassroomDto,
    responses(
        (status = 200, description = "Classroom updated successfully", body = Classroom),
        (status = 400, description = "Malformed identifier or field", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse),
        (status = 404, description = "Classroom not found", body = MessageResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn update_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    PartialJson(dto): PartialJson<UpdateClassroomDto>,
) -> Result<Json<Classroom>, AppError> {
    let classroom = ClassroomService::update_classroom(state.store.as_ref(), &id, dto).await?;
    Ok(Json(classroom))
}

#[utoipa::path(
    delete,
    path = "/api/classrooms/{id}",
    params(
        ("id" = String, Path, description = "Classroom ID")
    ),
    responses(
        (status = 200, description = "Classroom deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - admin only", body = MessageResponse),
        (status = 404, description = "Classroom not found", body = MessageResponse)
    ),
    tag = "Classrooms",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn delete_classroom(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    ClassroomService::delete_classroom(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        message: "Classroom deleted successfully".to_string(),
    }))
}
