use schoolhub_auth::Role;
use schoolhub_db::{
    ClassroomStore, PgPool, PgStore, SchoolStore, StoreError, StudentStore, UserStore,
};
use schoolhub_models::{
    ClassroomChanges, NewClassroom, NewSchool, NewStudent, NewUser, SchoolChanges,
    StudentChanges,
};
use uuid::Uuid;

fn new_user(email: &str, role: Role) -> NewUser {
    NewUser {
        name: "Grace Hopper".to_string(),
        email: email.to_string(),
        role,
    }
}

fn new_student(first_name: &str, classroom: Uuid) -> NewStudent {
    NewStudent {
        first_name: first_name.to_string(),
        last_name: "Lovelace".to_string(),
        age: 12,
        classroom,
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_school_crud(pool: PgPool) {
    let store = PgStore::new(pool);
    let admin = Uuid::now_v7();

    let school = store
        .insert_school(NewSchool {
            name: "Lincoln High".to_string(),
            address: "123 Main Street".to_string(),
            admin,
        })
        .await
        .unwrap();
    assert_eq!(school.name, "Lincoln High");
    assert_eq!(school.admin, admin);

    assert_eq!(store.list_schools().await.unwrap(), vec![school.clone()]);
    assert_eq!(store.find_school(school.id).await.unwrap(), Some(school.clone()));

    let updated = store
        .update_school(
            school.id,
            SchoolChanges {
                address: Some("456 Elm Avenue".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, school.id);
    assert_eq!(updated.name, "Lincoln High");
    assert_eq!(updated.address, "456 Elm Avenue");
    assert_eq!(updated.admin, admin);

    assert!(store.delete_school(school.id).await.unwrap());
    assert!(!store.delete_school(school.id).await.unwrap());
    assert_eq!(store.find_school(school.id).await.unwrap(), None);
    assert!(store.list_schools().await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_missing_rows_return_none(pool: PgPool) {
    let store = PgStore::new(pool);
    let id = Uuid::now_v7();

    assert!(
        store
            .update_school(id, SchoolChanges::default())
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .update_classroom(id, ClassroomChanges::default())
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .update_student(id, StudentChanges::default())
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_classroom_update_keeps_absent_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let school = Uuid::now_v7();
    let classroom = store
        .insert_classroom(NewClassroom {
            name: "Room 101".to_string(),
            school,
        })
        .await
        .unwrap();

    let moved_to = Uuid::now_v7();
    let updated = store
        .update_classroom(
            classroom.id,
            ClassroomChanges {
                school: Some(moved_to),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, "Room 101");
    assert_eq!(updated.school, moved_to);
    assert!(store.delete_classroom(classroom.id).await.unwrap());
    assert!(!store.delete_classroom(classroom.id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_student_update_keeps_absent_fields(pool: PgPool) {
    let store = PgStore::new(pool);
    let classroom = Uuid::now_v7();
    let student = store.insert_student(new_student("Ada", classroom)).await.unwrap();
    assert_eq!(store.find_student(student.id).await.unwrap(), Some(student.clone()));

    let updated = store
        .update_student(
            student.id,
            StudentChanges {
                age: Some(13),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.first_name, "Ada");
    assert_eq!(updated.last_name, "Lovelace");
    assert_eq!(updated.age, 13);
    assert_eq!(updated.classroom, classroom);
    assert_eq!(store.list_students().await.unwrap(), vec![updated]);

    assert!(store.delete_student(student.id).await.unwrap());
    assert!(!store.delete_student(student.id).await.unwrap());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_find_classrooms_skips_missing_and_duplicate_ids(pool: PgPool) {
    let store = PgStore::new(pool);
    let school = Uuid::now_v7();
    let mut created = Vec::new();
    for name in ["Room 101", "Room 102", "Room 103"] {
        created.push(
            store
                .insert_classroom(NewClassroom {
                    name: name.to_string(),
                    school,
                })
                .await
                .unwrap(),
        );
    }

    let found = store
        .find_classrooms(&[created[2].id, Uuid::now_v7(), created[0].id, created[2].id])
        .await
        .unwrap();
    assert_eq!(found, vec![created[0].clone(), created[2].clone()]);

    assert!(store.find_classrooms(&[]).await.unwrap().is_empty());
    assert_eq!(store.list_classrooms().await.unwrap(), created);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_list_students_in_filters_by_classroom(pool: PgPool) {
    let store = PgStore::new(pool);
    let room_a = Uuid::now_v7();
    let room_b = Uuid::now_v7();
    for (name, classroom) in [("Ada", room_a), ("Alan", room_b), ("Grace", room_a)] {
        store.insert_student(new_student(name, classroom)).await.unwrap();
    }

    let in_a = store.list_students_in(&[room_a]).await.unwrap();
    let names: Vec<&str> = in_a.iter().map(|s| s.first_name.as_str()).collect();
    assert_eq!(names, vec!["Ada", "Grace"]);

    assert_eq!(store.list_students_in(&[room_a, room_b]).await.unwrap().len(), 3);
    assert!(store.list_students_in(&[Uuid::now_v7()]).await.unwrap().is_empty());
    assert!(store.list_students_in(&[]).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_users_round_trip_their_role(pool: PgPool) {
    let store = PgStore::new(pool);
    let teacher = store
        .insert_user(new_user("teacher@school.test", Role::Teacher))
        .await
        .unwrap();
    let admin = store
        .insert_user(new_user("admin@school.test", Role::Superadmin))
        .await
        .unwrap();

    assert_eq!(store.find_user(teacher.id).await.unwrap(), Some(teacher.clone()));
    assert_eq!(
        store.find_user(admin.id).await.unwrap().map(|user| user.role),
        Some(Role::Superadmin)
    );

    let found = store
        .find_users(&[admin.id, Uuid::now_v7(), teacher.id, admin.id])
        .await
        .unwrap();
    assert_eq!(found, vec![teacher, admin]);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_duplicate_email_is_rejected(pool: PgPool) {
    let store = PgStore::new(pool);
    store
        .insert_user(new_user("admin@school.test", Role::Admin))
        .await
        .unwrap();

    let err = store
        .insert_user(new_user("admin@school.test", Role::Teacher))
        .await
        .unwrap_err();

    match err {
        StoreError::Rejected(message) => assert!(message.contains("duplicate key")),
        other => panic!("expected a rejected write, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_unknown_stored_role_fails_to_decode(pool: PgPool) {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id, name, email, role) VALUES ($1, $2, $3, $4)")
        .bind(id)
        .bind("Janitor")
        .bind("janitor@school.test")
        .bind("janitor")
        .execute(&pool)
        .await
        .unwrap();

    let store = PgStore::new(pool);
    let err = store.find_user(id).await.unwrap_err();
    assert!(matches!(err, StoreError::Database(_)));
}
