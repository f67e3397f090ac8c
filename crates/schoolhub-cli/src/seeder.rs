//! Fake data generation.
//!
//! Every seeded school gets its own admin user, `classrooms_per_school`
//! classrooms and `students_per_classroom` students in each classroom.

use std::time::Instant;

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::name::en::{FirstName, LastName};
use schoolhub_auth::Role;
use schoolhub_db::{Store, StoreError};
use schoolhub_models::{NewClassroom, NewSchool, NewStudent, NewUser};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedConfig {
    pub schools: usize,
    pub classrooms_per_school: usize,
    pub students_per_classroom: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            schools: 5,
            classrooms_per_school: 4,
            students_per_classroom: 25,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub schools: usize,
    pub classrooms: usize,
    pub students: usize,
}

fn fake_admin() -> NewUser {
    let first_name: String = FirstName().fake();
    let last_name: String = LastName().fake();
    NewUser {
        email: format!(
            "{}.{}.{}@schoolhub.test",
            first_name.to_lowercase(),
            last_name.to_lowercase(),
            Uuid::now_v7().simple()
        ),
        name: format!("{first_name} {last_name}"),
        role: Role::Admin,
    }
}

fn fake_school(admin: Uuid) -> NewSchool {
    let city: String = CityName().fake();
    let street: String = StreetName().fake();
    let building: String = BuildingNumber().fake();
    let zip: String = ZipCode().fake();
    NewSchool {
        name: format!("{city} High School"),
        address: format!("{building} {street}, {city} {zip}"),
        admin,
    }
}

fn fake_student(classroom: Uuid) -> NewStudent {
    NewStudent {
        first_name: FirstName().fake(),
        last_name: LastName().fake(),
        age: (5..=18).fake(),
        classroom,
    }
}

pub async fn seed(store: &dyn Store, config: &SeedConfig) -> Result<SeedSummary, StoreError> {
    let start_time = Instant::now();
    let mut summary = SeedSummary::default();

    for _ in 0..config.schools {
        let admin = store.insert_user(fake_admin()).await?;
        summary.users += 1;

        let school = store.insert_school(fake_school(admin.id)).await?;
        summary.schools += 1;

        for room in 1..=config.classrooms_per_school {
            let classroom = store
                .insert_classroom(NewClassroom {
                    name: format!("Room {}", 100 + room),
                    school: school.id,
                })
                .await?;
            summary.classrooms += 1;

            for _ in 0..config.students_per_classroom {
                store.insert_student(fake_student(classroom.id)).await?;
                summary.students += 1;
            }
        }

        println!("   ✓ {} ({})", school.name, school.id);
    }

    println!("   Seeded in {:?}", start_time.elapsed());
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_db::{MemoryStore, SchoolStore, StudentStore};

    #[test]
    fn test_fake_student_age_in_range() {
        for _ in 0..50 {
            let student = fake_student(Uuid::now_v7());
            assert!((5..=18).contains(&student.age));
            assert!(!student.first_name.is_empty());
        }
    }

    #[test]
    fn test_fake_school_is_valid_for_the_api() {
        let school = fake_school(Uuid::now_v7());
        assert!(school.name.chars().count() >= 5);
        assert!(school.address.chars().count() >= 10);
    }

    #[tokio::test]
    async fn test_seed_counts() {
        let store = MemoryStore::new();
        let config = SeedConfig {
            schools: 2,
            classrooms_per_school: 3,
            students_per_classroom: 4,
        };

        let summary = seed(&store, &config).await.unwrap();

        assert_eq!(
            summary,
            SeedSummary {
                users: 2,
                schools: 2,
                classrooms: 6,
                students: 24,
            }
        );
        assert_eq!(store.list_schools().await.unwrap().len(), 2);
        assert_eq!(store.list_students().await.unwrap().len(), 24);
    }
}
