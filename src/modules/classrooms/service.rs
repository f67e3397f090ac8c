use std::collections::HashMap;

use schoolhub_core::AppError;
use schoolhub_db::Store;
use schoolhub_models::{
    Classroom, ClassroomChanges, ClassroomWithStudents, CreateClassroomDto, NewClassroom, Student,
    UpdateClassroomDto, parse_identifier,
};
use schoolhub_observability::track_resource_created;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::{rejected_write, store_failure};

pub struct ClassroomService;

impl ClassroomService {
    #[instrument(skip(store, dto), fields(classroom.name = %dto.name, db.operation = "INSERT", db.table = "classrooms"))]
    pub async fn create_classroom(
        store: &dyn Store,
        dto: CreateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let new_classroom = NewClassroom::try_from(dto).map_err(AppError::bad_request)?;
        let classroom = store
            .insert_classroom(new_classroom)
            .await
            .map_err(rejected_write)?;

        track_resource_created("classroom");
        info!(classroom.id = %classroom.id, classroom.school = %classroom.school, "Classroom created successfully");
        Ok(classroom)
    }

    /// Every classroom with the students that point at it.
    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "classrooms"))]
    pub async fn get_all_classrooms(
        store: &dyn Store,
    ) -> Result<Vec<ClassroomWithStudents>, AppError> {
        let classrooms = store.list_classrooms().await.map_err(store_failure)?;
        let ids: Vec<Uuid> = classrooms.iter().map(|classroom| classroom.id).collect();

        let mut by_classroom: HashMap<Uuid, Vec<Student>> = HashMap::new();
        for student in store.list_students_in(&ids).await.map_err(store_failure)? {
            by_classroom.entry(student.classroom).or_default().push(student);
        }

        debug!(count = classrooms.len(), "Fetched classrooms");

        Ok(classrooms
            .into_iter()
            .map(|classroom| {
                let students = by_classroom.remove(&classroom.id).unwrap_or_default();
                ClassroomWithStudents::new(classroom, students)
            })
            .collect())
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "classrooms"))]
    pub async fn get_classroom_by_id(
        store: &dyn Store,
        id: &str,
    ) -> Result<ClassroomWithStudents, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;
        let classroom = store
            .find_classroom(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| {
                debug!(classroom.id = %id, "Classroom not found");
                AppError::not_found(anyhow::anyhow!("Classroom not found"))
            })?;

        let students = store
            .list_students_in(&[classroom.id])
            .await
            .map_err(store_failure)?;
        Ok(ClassroomWithStudents::new(classroom, students))
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE", db.table = "classrooms"))]
    pub async fn update_classroom(
        store: &dyn Store,
        id: &str,
        dto: UpdateClassroomDto,
    ) -> Result<Classroom, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::bad_request)?;
        let changes = ClassroomChanges::try_from(dto).map_err(AppError::bad_request)?;

        let classroom = store
            .update_classroom(id, changes)
            .await
            .map_err(rejected_write)?
            .ok_or_else(|| {
                warn!(classroom.id = %id, "Attempted to update non-existent classroom");
                AppError::not_found(anyhow::anyhow!("Classroom not found"))
            })?;

        info!(classroom.id = %classroom.id, "Classroom updated successfully");
        Ok(classroom)
    }

    /// Students of a deleted classroom keep their reference to it.
    #[instrument(skip(store), fields(db.operation = "DELETE", db.table = "classrooms"))]
    pub async fn delete_classroom(store: &dyn Store, id: &str) -> Result<(), AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;

        if !store.delete_classroom(id).await.map_err(store_failure)? {
            warn!(classroom.id = %id, "Attempted to delete non-existent classroom");
            return Err(AppError::not_found(anyhow::anyhow!("Classroom not found")));
        }

        info!(classroom.id = %id, "Classroom deleted successfully");
        Ok(())
    }
}
