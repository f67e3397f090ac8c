//! Storage boundary.
//!
//! One trait per collection, each operation a single independent call. Nothing
//! here spans records: there are no transactions across collections and no
//! cascading deletes.

use async_trait::async_trait;
use schoolhub_models::{
    Classroom, ClassroomChanges, NewClassroom, NewSchool, NewStudent, NewUser, School,
    SchoolChanges, Student, StudentChanges, User,
};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database refused the write (constraint violation, bad value).
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn insert_school(&self, school: NewSchool) -> Result<School, StoreError>;
    async fn list_schools(&self) -> Result<Vec<School>, StoreError>;
    async fn find_school(&self, id: Uuid) -> Result<Option<School>, StoreError>;
    /// Applies the present fields and returns the updated record, or `None` if absent.
    async fn update_school(
        &self,
        id: Uuid,
        changes: SchoolChanges,
    ) -> Result<Option<School>, StoreError>;
    /// Returns whether a record was removed.
    async fn delete_school(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait ClassroomStore: Send + Sync {
    async fn insert_classroom(&self, classroom: NewClassroom) -> Result<Classroom, StoreError>;
    async fn list_classrooms(&self) -> Result<Vec<Classroom>, StoreError>;
    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError>;
    async fn find_classrooms(&self, ids: &[Uuid]) -> Result<Vec<Classroom>, StoreError>;
    async fn update_classroom(
        &self,
        id: Uuid,
        changes: ClassroomChanges,
    ) -> Result<Option<Classroom>, StoreError>;
    async fn delete_classroom(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError>;
    async fn list_students(&self) -> Result<Vec<Student>, StoreError>;
    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError>;
    /// Students whose `classroom` is one of `classroom_ids`.
    async fn list_students_in(&self, classroom_ids: &[Uuid]) -> Result<Vec<Student>, StoreError>;
    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError>;
    async fn delete_student(&self, id: Uuid) -> Result<bool, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;
    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;
    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError>;
}

/// Everything the application needs from persistence.
pub trait Store: SchoolStore + ClassroomStore + StudentStore + UserStore {}

impl<T> Store for T where T: SchoolStore + ClassroomStore + StudentStore + UserStore {}
