//! PostgreSQL store.

use async_trait::async_trait;
use schoolhub_models::{
    Classroom, ClassroomChanges, NewClassroom, NewSchool, NewStudent, NewUser, School,
    SchoolChanges, Student, StudentChanges, User,
};
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use tracing::debug;
use uuid::Uuid;

use crate::store::{ClassroomStore, SchoolStore, StoreError, StudentStore, UserStore};

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Constraint violations become [`StoreError::Rejected`] with the database message.
fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) if db_err.kind() != ErrorKind::Other => {
            debug!(code = ?db_err.code(), constraint = ?db_err.constraint(), "Constraint violation");
            StoreError::Rejected(db_err.message().to_string())
        }
        other => StoreError::Database(other),
    }
}

#[async_trait]
impl SchoolStore for PgStore {
    async fn insert_school(&self, school: NewSchool) -> Result<School, StoreError> {
        sqlx::query_as::<_, School>(
            r#"
            INSERT INTO schools (id, name, address, admin_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, address, admin_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&school.name)
        .bind(&school.address)
        .bind(school.admin)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_schools(&self) -> Result<Vec<School>, StoreError> {
        sqlx::query_as::<_, School>("SELECT id, name, address, admin_id FROM schools ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_school(&self, id: Uuid) -> Result<Option<School>, StoreError> {
        sqlx::query_as::<_, School>("SELECT id, name, address, admin_id FROM schools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn update_school(
        &self,
        id: Uuid,
        changes: SchoolChanges,
    ) -> Result<Option<School>, StoreError> {
        sqlx::query_as::<_, School>(
            r#"
            UPDATE schools
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                admin_id = COALESCE($4, admin_id)
            WHERE id = $1
            RETURNING id, name, address, admin_id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.address)
        .bind(changes.admin)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_school(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM schools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ClassroomStore for PgStore {
    async fn insert_classroom(&self, classroom: NewClassroom) -> Result<Classroom, StoreError> {
        sqlx::query_as::<_, Classroom>(
            r#"
            INSERT INTO classrooms (id, name, school_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, school_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&classroom.name)
        .bind(classroom.school)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_classrooms(&self) -> Result<Vec<Classroom>, StoreError> {
        sqlx::query_as::<_, Classroom>("SELECT id, name, school_id FROM classrooms ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_classroom(&self, id: Uuid) -> Result<Option<Classroom>, StoreError> {
        sqlx::query_as::<_, Classroom>("SELECT id, name, school_id FROM classrooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_classrooms(&self, ids: &[Uuid]) -> Result<Vec<Classroom>, StoreError> {
        sqlx::query_as::<_, Classroom>(
            "SELECT id, name, school_id FROM classrooms WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_classroom(
        &self,
        id: Uuid,
        changes: ClassroomChanges,
    ) -> Result<Option<Classroom>, StoreError> {
        sqlx::query_as::<_, Classroom>(
            r#"
            UPDATE classrooms
            SET name = COALESCE($2, name),
                school_id = COALESCE($3, school_id)
            WHERE id = $1
            RETURNING id, name, school_id
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.school)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_classroom(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM classrooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl StudentStore for PgStore {
    async fn insert_student(&self, student: NewStudent) -> Result<Student, StoreError> {
        sqlx::query_as::<_, Student>(
            r#"
            INSERT INTO students (id, first_name, last_name, age, classroom_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, first_name, last_name, age, classroom_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(student.age)
        .bind(student.classroom)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_students(&self) -> Result<Vec<Student>, StoreError> {
        sqlx::query_as::<_, Student>(
            "SELECT id, first_name, last_name, age, classroom_id FROM students ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_student(&self, id: Uuid) -> Result<Option<Student>, StoreError> {
        sqlx::query_as::<_, Student>(
            "SELECT id, first_name, last_name, age, classroom_id FROM students WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn list_students_in(&self, classroom_ids: &[Uuid]) -> Result<Vec<Student>, StoreError> {
        sqlx::query_as::<_, Student>(
            r#"
            SELECT id, first_name, last_name, age, classroom_id
            FROM students
            WHERE classroom_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(classroom_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn update_student(
        &self,
        id: Uuid,
        changes: StudentChanges,
    ) -> Result<Option<Student>, StoreError> {
        sqlx::query_as::<_, Student>(
            r#"
            UPDATE students
            SET first_name = COALESCE($2, first_name),
                last_name = COALESCE($3, last_name),
                age = COALESCE($4, age),
                classroom_id = COALESCE($5, classroom_id)
            WHERE id = $1
            RETURNING id, first_name, last_name, age, classroom_id
            "#,
        )
        .bind(id)
        .bind(changes.first_name)
        .bind(changes.last_name)
        .bind(changes.age)
        .bind(changes.classroom)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn delete_student(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, role
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        sqlx::query_as::<_, User>("SELECT id, name, email, role FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn find_users(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        sqlx::query_as::<_, User>(
            "SELECT id, name, email, role FROM users WHERE id = ANY($1) ORDER BY id",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}
