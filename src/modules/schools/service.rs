use std::collections::HashMap;

use schoolhub_core::AppError;
use schoolhub_db::Store;
use schoolhub_models::{
    CreateSchoolDto, NewSchool, School, SchoolChanges, SchoolWithAdmin, UpdateSchoolDto,
    parse_identifier,
};
use schoolhub_observability::track_resource_created;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::{rejected_write, store_failure};

pub struct SchoolService;

impl SchoolService {
    #[instrument(skip(store, dto), fields(school.name = %dto.name, db.operation = "INSERT", db.table = "schools"))]
    pub async fn create_school(store: &dyn Store, dto: CreateSchoolDto) -> Result<School, AppError> {
        let new_school = NewSchool::try_from(dto).map_err(AppError::bad_request)?;
        let school = store.insert_school(new_school).await.map_err(rejected_write)?;

        track_resource_created("school");
        info!(school.id = %school.id, school.admin = %school.admin, "School created successfully");
        Ok(school)
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_all_schools(store: &dyn Store) -> Result<Vec<SchoolWithAdmin>, AppError> {
        let schools = store.list_schools().await.map_err(store_failure)?;

        let mut admin_ids: Vec<Uuid> = schools.iter().map(|school| school.admin).collect();
        admin_ids.sort_unstable();
        admin_ids.dedup();
        let admins: HashMap<Uuid, _> = store
            .find_users(&admin_ids)
            .await
            .map_err(store_failure)?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        debug!(count = schools.len(), admins = admins.len(), "Fetched schools");

        Ok(schools
            .into_iter()
            .map(|school| {
                let admin = admins.get(&school.admin).cloned();
                SchoolWithAdmin::new(school, admin)
            })
            .collect())
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "schools"))]
    pub async fn get_school_by_id(store: &dyn Store, id: &str) -> Result<SchoolWithAdmin, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;
        let school = store
            .find_school(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| {
                debug!(school.id = %id, "School not found");
                AppError::not_found(anyhow::anyhow!("School not found"))
            })?;

        let admin = store.find_user(school.admin).await.map_err(store_failure)?;
        if admin.is_none() {
            debug!(school.id = %id, school.admin = %school.admin, "School admin no longer exists");
        }
        Ok(SchoolWithAdmin::new(school, admin))
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE", db.table = "schools"))]
    pub async fn update_school(
        store: &dyn Store,
        id: &str,
        dto: UpdateSchoolDto,
    ) -> Result<School, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::bad_request)?;
        let changes = SchoolChanges::try_from(dto).map_err(AppError::bad_request)?;

        let school = store
            .update_school(id, changes)
            .await
            .map_err(rejected_write)?
            .ok_or_else(|| {
                warn!(school.id = %id, "Attempted to update non-existent school");
                AppError::not_found(anyhow::anyhow!("School not found"))
            })?;

        info!(school.id = %school.id, "School updated successfully");
        Ok(school)
    }

    #[instrument(skip(store), fields(db.operation = "DELETE", db.table = "schools"))]
    pub async fn delete_school(store: &dyn Store, id: &str) -> Result<(), AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;

        if !store.delete_school(id).await.map_err(store_failure)? {
            warn!(school.id = %id, "Attempted to delete non-existent school");
            return Err(AppError::not_found(anyhow::anyhow!("School not found")));
        }

        info!(school.id = %id, "School deleted successfully");
        Ok(())
    }
}
