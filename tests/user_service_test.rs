use std::sync::Arc;

use synclearn::{
    AuthProvider, InMemoryUserRepository, NewUser, SyncLearnError, UserRepository, UserRole,
    UserService, UserStatus,
};

fn new_user(email: &str, nickname: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        nickname: nickname.to_string(),
        password: Some("secret123".to_string()),
        provider: AuthProvider::Local,
        role: UserRole::User,
    }
}

#[tokio::test]
async fn test_register_and_lookup() {
    let service = UserService::new(InMemoryUserRepository::new());

    let saved = service
        .register(new_user("alice@example.com", "alice"))
        .await
        .unwrap();
    let id = saved.id().expect("id assigned on save");
    assert!(saved.created_at().is_some());
    assert_eq!(saved.status(), UserStatus::Active);

    let by_email = service.get_by_email("alice@example.com").await.unwrap();
    let by_id = service.get_by_id(id).await.unwrap();
    assert_eq!(by_email, saved);
    assert_eq!(by_id, saved);
    assert_eq!(by_email.provider(), AuthProvider::Local);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let service = UserService::new(InMemoryUserRepository::new());
    service
        .register(new_user("alice@example.com", "alice"))
        .await
        .unwrap();

    let err = service
        .register(new_user("alice@example.com", "alice2"))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncLearnError::DuplicateEmail { ref email } if email == "alice@example.com"));
    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_validates_input() {
    let service = UserService::new(InMemoryUserRepository::new());

    let err = service
        .register(new_user("alice@example.com", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncLearnError::Validation { ref field, .. } if field == "nickname"));

    let err = service
        .register(new_user("invalid-email", "alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, SyncLearnError::Validation { ref field, .. } if field == "email"));
}

#[tokio::test]
async fn test_register_rejects_values_too_long_for_the_table() {
    let service = UserService::new(InMemoryUserRepository::new());

    let err = service
        .register(new_user("alice@example.com", &"n".repeat(21)))
        .await
        .unwrap_err();

    assert!(matches!(err, SyncLearnError::Validation { ref field, .. } if field == "nickname"));
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_missing_user_is_not_found() {
    let service = UserService::new(InMemoryUserRepository::new());

    let err = service.get_by_email("nobody@example.com").await.unwrap_err();
    assert!(matches!(err, SyncLearnError::NotFound { .. }));
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn test_change_status_keeps_identity_and_created_at() {
    let service = UserService::new(InMemoryUserRepository::new());
    let saved = service
        .register(new_user("alice@example.com", "alice"))
        .await
        .unwrap();
    let id = saved.id().unwrap();

    let dormant = service
        .change_status(id, UserStatus::Inactive)
        .await
        .unwrap();

    assert_eq!(dormant.id(), Some(id));
    assert_eq!(dormant.status(), UserStatus::Inactive);
    assert_eq!(dormant.created_at(), saved.created_at());
    assert_eq!(
        service.get_by_id(id).await.unwrap().status(),
        UserStatus::Inactive
    );
}

#[tokio::test]
async fn test_list_is_oldest_first_and_remove() {
    let service = UserService::new(InMemoryUserRepository::new());
    let first = service
        .register(new_user("first@example.com", "first"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = service
        .register(new_user("second@example.com", "second"))
        .await
        .unwrap();

    let emails: Vec<String> = service
        .list()
        .await
        .unwrap()
        .iter()
        .map(|u| u.email().to_string())
        .collect();
    assert_eq!(emails, vec!["first@example.com", "second@example.com"]);

    service.remove(first.id().unwrap()).await.unwrap();
    assert_eq!(service.list().await.unwrap(), vec![second]);
}

#[tokio::test]
async fn test_concurrent_saves_keep_email_unique() {
    let repo = Arc::new(InMemoryUserRepository::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            let user = new_user("race@example.com", &format!("racer{}", i))
                .into_user()
                .unwrap();
            repo.save(&user).await
        }));
    }

    let mut ok = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            ok += 1;
        }
    }

    assert_eq!(ok, 1);
    assert_eq!(repo.count().await.unwrap(), 1);
}
