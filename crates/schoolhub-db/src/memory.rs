//! In-memory store for tests.
//!
//! Mirrors [`PgStore`](crate::PgStore): ids are UUID v7, lists come back in id
//! order and a duplicate user email is rejected like the unique index would.

use std::collections::BTreeMap;

use async_trait::async_trait;
use schoolhub_models::{
    Classroom, ClassroomChanges, NewClassroom, NewSchool, NewStudent, NewUser, School,
    SchoolChanges, Student, StudentChanges, User,
};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{ClassroomStore, SchoolStore, StoreError, StudentStore, UserStore};

#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<BTreeMap<Uuid, User>>,
    schools: RwLock<BTreeMap<Uuid, School>>,
    classrooms: RwLock<BTreeMap<Uuid, Classroom>>,
    students: RwLock<BTreeMap<Uuid, Student>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn pick<T: Clone>(map: &BTreeMap<Uuid, T>, ids: &[Uuid]) -> Vec<T> {
    map.iter()
        .filter(|(id, _)| ids.contains(id))
        .map(|(_, value)| value.clone())
        .collect()
}

#[async_trait]
impl SchoolStore for MemoryStore {
    async fn insert_school(&self, school: NewSchool) -> Result<School, StoreError> {
        let school = school.into_school(Uuid::now_v7());
        self.schools.write().await.insert(school.id, school.clone());
        Ok(school)
    }

    async fn list_schools(&self) -> Result<Vec<School>, StoreError> {
        Ok(self.schools.read().await.values().cloned().collect())
    }

    async fn find_school(&self, id: Uuid) -> Result<Option<School>, StoreError> {
        Ok(self.schools.read().await.get(&id).cloned())
    }

    async fn update_school(
        &self,
        id: Uuid,
        changes: SchoolChanges,
    ) -> Result<Option<School>, StoreError> {
        let mut schools = self.schools.write().await;
        Ok(schools.get_mut(&id).map(|school| {
            changes.apply(school);
            school.clone()
        }))
    }

    async fn delete_school(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.schools.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl ClassroomStore for MemoryStore {
    async fn insert_classroom(&self, classroom: NewClassroom) -> Result<Classroom, StoreError> {
        let classroom = classroom.into_classroom(Uuid::now_v7());
        self.classrooms
            .write()
            .await
            .insert(classroom.id, classroom.clone());
        Ok(classroom)
    }

    async fn list_classrooms(&self) -> Result<Vec<Classroom>, StoreError> {
        Ok(self.classrooms.read().await.values().cloned().collect())
    }

    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError> {
        Ok(self.classrooms.read().await.get(&id).cloned())
    }

    async fn find_classrooms(&self, ids: &[Uuid]) -> Result<Vec<Classroom>, StoreError> {
        Ok(pick(&*self.classrooms.read().await, ids))
    }

    async fn update_classroom(
        &self,
        id: Uuid,
        changes: ClassroomChanges,
    ) -> Result<Option<Classroom>, StoreError> {
        let mut classrooms = self.classrooms.write().await;
        Ok(classrooms.get_mut(&id).map(|classroom| {
            changes.apply(classroom);
            classroom.clone()
        }))
    }

    async fn delete_classroom(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.classrooms.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        let student = student.into_student(Uuid::now_v7());
        self.students
            .write()
            .await
            .insert(student.id, student.clone());
        Ok(student)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        Ok(self.students.read().await.values().cloned().collect())
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        Ok(self.students.read().await.get(&id).cloned())
    }

    async fn list_students_in(&self, classroom_ids: &[Uuid]) -> Result<Vec<Student>, StoreError> {
        Ok(self
            .students
            .read()
            .await
            .values()
            .filter(|student| classroom_ids.contains(&student.classroom))
            .cloned()
            .collect())
    }

    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        let mut students = self.students.write().await;
        Ok(students.get_mut(&id).map(|student| {
            changes.apply(student);
            student.clone()
        }))
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool, StoreError> {
        Ok(self.students.write().await.remove(&id).is_some())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|existing| existing.email == user.email) {
            return Err(StoreError::Rejected(format!(
                "duplicate key value violates unique constraint \"users_email_key\": {}",
                user.email
            )));
        }
        let user = user.into_user(Uuid::now_v7());
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        Ok(pick(&*self.users.read().await, ids))
    }
}
