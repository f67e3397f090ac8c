use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use schoolhub_core::{AppError, MessageResponse};
use schoolhub_models::{CreateSchoolDto, School, SchoolWithAdmin, UpdateSchoolDto};
use tracing::instrument;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::{PartialJson, ValidatedJson};

use super::service::SchoolService;

#[utoipa::path(
    post,
    path = "/api/schools",
    request_body = CreateSchoolDto,
    responses(
        (status = 201, description = "School created successfully", body = School),
        (status = 400, description = "Validation failed or the store rejected the record", body = schoolhub_core::ValidationErrorResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - superadmin only", body = MessageResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn create_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSchoolDto>,
) -> Result<(StatusCode, Json<School>), AppError> {
    let school = SchoolService::create_school(state.store.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(school)))
}

#[utoipa::path(
    get,
    path = "/api/schools",
    responses(
        (status = 200, description = "All schools with their admin", body = Vec<SchoolWithAdmin>),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 500, description = "Store failure", body = MessageResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn get_all_schools(
    State(state): State<AppState>,
) -> Result<Json<Vec<SchoolWithAdmin>>, AppError> {
    let schools = SchoolService::get_all_schools(state.store.as_ref()).await?;
    Ok(Json(schools))
}

#[utoipa::path(
    get,
    path = "/api/schools/{id}",
    params(
        ("id" = String, Path, description = "School ID")
    ),
    responses(
        (status = 200, description = "School details", body = SchoolWithAdmin),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 404, description = "School not found", body = MessageResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
pub async fn get_school(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SchoolWithAdmin>, AppError> {
    let school = SchoolService::get_school_by_id(state.store.as_ref(), &id).await?;
    Ok(Json(school))
}

#[utoipa::path(
    put,
    path = "/api/schools/{id}",
    params(
        ("id" = String, Path, description = "School ID")
    ),
    request_body = UpdateSchoolDto,
    responses(
        (status = 200, description = "School updated successfully", body = School),
        (status = 400, description = "Malformed identifier or field", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - superadmin only", body = MessageResponse),
        (status = 404, description = "School not found", body = MessageResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user, dto), fields(user.id = %auth_user.user_id()))]
pub async fn update_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
    PartialJson(dto): PartialJson<UpdateSchoolDto>,
) -> Result<Json<School>, AppError> {
    let school = SchoolService::update_school(state.store.as_ref(), &id, dto).await?;
    Ok(Json(school))
}

#[utoipa::path(
    delete,
    path = "/api/schools/{id}",
    params(
        ("id" = String, Path, description = "School ID")
    ),
    responses(
        (status = 200, description = "School deleted successfully", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 403, description = "Forbidden - superadmin only", body = MessageResponse),
        (status = 404, description = "School not found", body = MessageResponse)
    ),
    tag = "Schools",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth_user), fields(user.id = %auth_user.user_id()))]
pub async fn delete_school(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    SchoolService::delete_school(state.store.as_ref(), &id).await?;
    Ok(Json(MessageResponse {
        message: "School deleted successfully".to_string(),
    }))
}
