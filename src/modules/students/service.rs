use std::collections::HashMap;

use schoolhub_core::AppError;
use schoolhub_db::Store;
use schoolhub_models::{
    CreateStudentDto, InvalidStudent, NewStudent, Student, StudentChanges, StudentWithClassroom,
    UpdateStudentDto, parse_identifier,
};
use schoolhub_observability::track_resource_created;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::modules::{rejected_write, store_failure};

pub struct StudentService;

impl StudentService {
    #[instrument(skip(store, dto), fields(db.operation = "INSERT", db.table = "students"))]
    pub async fn create_student(
        store: &dyn Store,
        dto: CreateStudentDto,
    ) -> Result<Student, AppError> {
        let new_student = NewStudent::try_from(dto).map_err(|e: InvalidStudent| {
            warn!(error = %e, "Student payload passed validation but could not be converted");
            AppError::bad_request(e)
        })?;
        let student = store
            .insert_student(new_student)
            .await
            .map_err(rejected_write)?;

        track_resource_created("student");
        info!(student.id = %student.id, student.classroom = %student.classroom, "Student created successfully");
        Ok(student)
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_all_students(store: &dyn Store) -> Result<Vec<StudentWithClassroom>, AppError> {
        let students = store.list_students().await.map_err(store_failure)?;

        let mut classroom_ids: Vec<Uuid> = students.iter().map(|student| student.classroom).collect();
        classroom_ids.sort_unstable();
        classroom_ids.dedup();
        let classrooms: HashMap<Uuid, _> = store
            .find_classrooms(&classroom_ids)
            .await
            .map_err(store_failure)?
            .into_iter()
            .map(|classroom| (classroom.id, classroom))
            .collect();

        debug!(count = students.len(), classrooms = classrooms.len(), "Fetched students");

        Ok(students
            .into_iter()
            .map(|student| {
                let classroom = classrooms.get(&student.classroom).cloned();
                StudentWithClassroom::new(student, classroom)
            })
            .collect())
    }

    #[instrument(skip(store), fields(db.operation = "SELECT", db.table = "students"))]
    pub async fn get_student_by_id(
        store: &dyn Store,
        id: &str,
    ) -> Result<StudentWithClassroom, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;
        let student = store
            .find_student(id)
            .await
            .map_err(store_failure)?
            .ok_or_else(|| {
                debug!(student.id = %id, "Student not found");
                AppError::not_found(anyhow::anyhow!("Student not found"))
            })?;

        let classroom = store
            .find_classroom(student.classroom)
            .await
            .map_err(store_failure)?;
        Ok(StudentWithClassroom::new(student, classroom))
    }

    #[instrument(skip(store, dto), fields(db.operation = "UPDATE", db.table = "students"))]
    pub async fn update_student(
        store: &dyn Store,
        id: &str,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::bad_request)?;
        let changes = StudentChanges::try_from(dto).map_err(AppError::bad_request)?;

        let student = store
            .update_student(id, changes)
            .await
            .map_err(rejected_write)?
            .ok_or_else(|| {
                warn!(student.id = %id, "Attempted to update non-existent student");
                AppError::not_found(anyhow::anyhow!("Student not found"))
            })?;

        info!(student.id = %student.id, "Student updated successfully");
        Ok(student)
    }

    #[instrument(skip(store), fields(db.operation = "DELETE", db.table = "students"))]
    pub async fn delete_student(store: &dyn Store, id: &str) -> Result<(), AppError> {
        let id = parse_identifier("_id", id).map_err(AppError::internal)?;

        if !store.delete_student(id).await.map_err(store_failure)? {
            warn!(student.id = %id, "Attempted to delete non-existent student");
            return Err(AppError::not_found(anyhow::anyhow!("Student not found")));
        }

        info!(student.id = %id, "Student deleted successfully");
        Ok(())
    }
}
