//! Integration tests for PgUserRepository.
//!
//! These tests run against a real PostgreSQL database using testcontainers.
//! Requires Docker to be available on the system.

mod common;

use common::TestDatabase;
use jobboard_core::{JobBoardError, PageRequest, Profile, User, UserId, UserRole};
use jobboard_repository::{JobRepository, ProfileRepository, UserRepository};

#[tokio::test]
async fn test_create_and_find_by_id() {
    let db = TestDatabase::new().await;
    let repo = db.users();

    let user = User::new(
        "Grace".to_string(),
        "grace@example.com".to_string(),
        UserRole::Applicant,
        "hash".to_string(),
    );
    let saved = repo.create(&user).await.expect("Failed to save user");
    assert_eq!(saved.id, user.id);

    let found = repo
        .find_by_id(user.id)
        .await
        .expect("Failed to find user")
        .expect("User not found");
    assert_eq!(found.email, "grace@example.com");
    assert_eq!(found.role, UserRole::Applicant);
    assert_eq!(found.password_hash, "hash");
}

#[tokio::test]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let result = db.users().find_by_id(UserId::new()).await.expect("Query failed");
    assert!(result.is_none());
}

#[tokio::test]
async fn test_duplicate_email_is_email_conflict() {
    let db = TestDatabase::new().await;
    db.user("dup@example.com", UserRole::Applicant).await;

    let second = User::new(
        "Other".to_string(),
        "dup@example.com".to_string(),
        UserRole::Admin,
        "hash".to_string(),
    );
    let err = db.users().create(&second).await.unwrap_err();
    assert!(matches!(err, JobBoardError::EmailConflict(ref email) if email == "dup@example.com"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind("dup@example.com")
        .fetch_one(db.pool().inner())
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_find_by_email() {
    let db = TestDatabase::new().await;
    let created = db.user("find@example.com", UserRole::Admin).await;

    let found = db.users().find_by_email("find@example.com").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert!(db.users().find_by_email("nobody@example.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_and_password_rotation() {
    let db = TestDatabase::new().await;
    let repo = db.users();
    let mut user = db.user("update@example.com", UserRole::Applicant).await;

    user.name = "Renamed".to_string();
    user.address = "1 Main St".to_string();
    user.profile_headline = "Rustacean".to_string();
    let updated = repo.update(&user).await.unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.profile_headline, "Rustacean");

    repo.update_password(user.id, "new-hash").await.unwrap();
    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "new-hash");

    let err = repo.update_password(UserId::new(), "x").await.unwrap_err();
    assert!(matches!(err, JobBoardError::NotFound { .. }));
}

#[tokio::test]
async fn test_find_with_profile() {
    let db = TestDatabase::new().await;
    let applicant = db.user("profiled@example.com", UserRole::Applicant).await;

    let bare = db.users().find_with_profile(applicant.id).await.unwrap().unwrap();
    assert!(bare.profile.is_none());

    let mut profile = Profile::new(applicant.id);
    profile.skills = vec!["rust".to_string(), "sql".to_string()];
    db.profiles().upsert(&profile).await.unwrap();

    let loaded = db.users().find_with_profile(applicant.id).await.unwrap().unwrap();
    let loaded_profile = loaded.profile.expect("profile should be loaded");
    assert_eq!(loaded_profile.skills, vec!["rust", "sql"]);
}

#[tokio::test]
async fn test_find_applicants_paginates_in_signup_order() {
    let db = TestDatabase::new().await;
    db.user("admin@example.com", UserRole::Admin).await;
    let mut expected = Vec::new();
    for i in 0..5 {
        expected.push(db.user(&format!("applicant{i}@example.com"), UserRole::Applicant).await.id);
    }

    let first = db.users().find_applicants(PageRequest::new(1, 2)).await.unwrap();
    let second = db.users().find_applicants(PageRequest::new(2, 2)).await.unwrap();
    let third = db.users().find_applicants(PageRequest::new(3, 2)).await.unwrap();

    assert_eq!(first.total, 5);
    assert_eq!(first.total_pages, 3);
    assert_eq!(third.len(), 1);

    let seen: Vec<UserId> = first
        .into_iter()
        .chain(second)
        .chain(third)
        .map(|u| {
            assert_eq!(u.role, UserRole::Applicant);
            u.id
        })
        .collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn test_find_applicants_empty_has_one_page() {
    let db = TestDatabase::new().await;
    let page = db.users().find_applicants(PageRequest::first()).await.unwrap();
    assert_eq!(page.total, 0);
    assert_eq!(page.total_pages, 1);
    assert!(page.is_empty());
}

#[tokio::test]
async fn test_delete_user_keeps_counters_consistent() {
    let db = TestDatabase::new().await;
    let admin = db.user("admin@example.com", UserRole::Admin).await;
    let leaving = db.user("leaving@example.com", UserRole::Applicant).await;
    let staying = db.user("staying@example.com", UserRole::Applicant).await;
    let job = db.job(&admin, "Backend Engineer", "Acme").await;

    db.jobs().apply(job.id, leaving.id).await.unwrap();
    db.jobs().apply(job.id, staying.id).await.unwrap();

    assert!(db.users().delete(leaving.id).await.unwrap());

    let reloaded = db.jobs().find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(reloaded.total_applications, 1);
    assert_eq!(db.jobs().application_count(job.id).await.unwrap(), 1);
    assert!(db.users().find_by_id(leaving.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_missing_user_returns_false() {
    let db = TestDatabase::new().await;
    assert!(!db.users().delete(UserId::new()).await.unwrap());
}

#[tokio::test]
async fn test_delete_admin_with_jobs_is_conflict() {
    let db = TestDatabase::new().await;
    let admin = db.user("owner@example.com", UserRole::Admin).await;
    db.job(&admin, "Designer", "Acme").await;

    let err = db.users().delete(admin.id).await.unwrap_err();
    assert!(matches!(err, JobBoardError::Conflict(_)));
    assert!(db.users().find_by_id(admin.id).await.unwrap().is_some());
}
