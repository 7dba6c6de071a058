//! User use case tests.

use std::sync::{Arc, Mutex};

use mockall::predicate::eq;
use once_cell::sync::Lazy;

use common::AppError;
use domain::{
    Argon2Hasher, GetUserProfile, LoginUser, MockPasswordHasher, PasswordError, PasswordHasher,
    RegisterUser, UpdateUserProfile, User, ValidateUserToken,
};
use sea_orm::DbErr;
use user_service::repository::{
    MockUserRepository, NewUser, RepositoryError, UserChanges, UserLookup,
};
use user_service::token::MockTokenService;
use user_service::{JwtTokenService, SigningKeys, TokenService, UserManager, UserUsecases};

const PHONE_NO: &str = "+62812141733";
const PASSWORD: &str = "SomeP@ssw0rdHere";

static KEYS: Lazy<SigningKeys> =
    Lazy::new(|| SigningKeys::generate(domain::DEFAULT_RSA_KEY_BITS).unwrap());

fn create_test_user(id: i64, successful_login_count: i64) -> User {
    User {
        id,
        phone_no: PHONE_NO.to_string(),
        full_name: "John Smith".to_string(),
        password_hash: b"stored-hash".to_vec(),
        successful_login_count,
    }
}

fn manager(
    repo: MockUserRepository,
    tokens: impl TokenService + 'static,
    hasher: impl PasswordHasher + 'static,
) -> UserManager {
    UserManager::new(Arc::new(repo), Arc::new(tokens), Arc::new(hasher))
}

fn jwt_tokens() -> JwtTokenService {
    JwtTokenService::new(&KEYS, domain::DEFAULT_TOKEN_TTL_MINUTES).unwrap()
}

// =============================================================================
// Register
// =============================================================================

#[tokio::test]
async fn test_register_stores_verifiable_hash() {
    let stored: Arc<Mutex<Option<NewUser>>> = Arc::new(Mutex::new(None));
    let captured = stored.clone();

    let mut repo = MockUserRepository::new();
    repo.expect_create().times(1).returning(move |user| {
        *captured.lock().unwrap() = Some(user);
        Ok(1)
    });

    let service = manager(repo, MockTokenService::new(), Argon2Hasher::new());
    let output = service
        .register(RegisterUser {
            phone_no: PHONE_NO.to_string(),
            full_name: "John Smith".to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(output.user_id, 1);

    let user = stored.lock().unwrap().take().unwrap();
    assert_eq!(user.phone_no, PHONE_NO);
    assert_eq!(user.full_name, "John Smith");
    assert_ne!(user.password_hash, PASSWORD.as_bytes());
    assert!(Argon2Hasher::new().verify(&user.password_hash, PASSWORD));
}

#[tokio::test]
async fn test_register_reports_every_invalid_field() {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().never();

    let service = manager(repo, MockTokenService::new(), hasher);
    let result = service
        .register(RegisterUser {
            phone_no: "no".to_string(),
            full_name: "L".to_string(),
            password: "bad".to_string(),
        })
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(errors.field("phone_no").len(), 3);
    assert_eq!(errors.field("full_name").len(), 1);
    assert_eq!(errors.field("password").len(), 4);
}

#[tokio::test]
async fn test_register_duplicate_phone_is_conflict() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .returning(|_| Err(RepositoryError::Conflict));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok(b"hash".to_vec()));

    let service = manager(repo, MockTokenService::new(), hasher);
    let result = service
        .register(RegisterUser {
            phone_no: PHONE_NO.to_string(),
            full_name: "John Smith".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::UserConflict)));
}

#[tokio::test]
async fn test_register_passes_database_failure_through() {
    let mut repo = MockUserRepository::new();
    repo.expect_create()
        .returning(|_| Err(RepositoryError::Database(DbErr::Custom("down".to_string()))));
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_hash().returning(|_| Ok(b"hash".to_vec()));

    let service = manager(repo, MockTokenService::new(), hasher);
    let result = service
        .register(RegisterUser {
            phone_no: PHONE_NO.to_string(),
            full_name: "John Smith".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

#[tokio::test]
async fn test_register_hash_failure_stores_nothing() {
    let mut repo = MockUserRepository::new();
    repo.expect_create().never();
    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_hash()
        .times(1)
        .returning(|_| Err(PasswordError::new("out of memory")));

    let service = manager(repo, MockTokenService::new(), hasher);
    let result = service
        .register(RegisterUser {
            phone_no: PHONE_NO.to_string(),
            full_name: "John Smith".to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(AppError::Password(ref e)) if *e == PasswordError::new("out of memory")
    ));
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_counts_and_issues_token() {
    let mut repo = MockUserRepository::new();
    repo.expect_get()
        .with(eq(UserLookup::PhoneNo(PHONE_NO.to_string())))
        .returning(|_| Ok(create_test_user(7, 2)));
    repo.expect_update()
        .with(eq(UserChanges {
            successful_login_count: Some(3),
            ..UserChanges::new(7)
        }))
        .times(1)
        .returning(|_| Ok(()));

    let mut hasher = MockPasswordHasher::new();
    hasher
        .expect_verify()
        .withf(|hash, plain| hash == b"stored-hash".as_slice() && plain == PASSWORD)
        .returning(|_, _| true);

    let service = manager(repo, jwt_tokens(), hasher);
    let output = service
        .login(LoginUser {
            phone_no: PHONE_NO.to_string(),
            password: PASSWORD.to_string(),
        })
        .await
        .unwrap();

    assert_eq!(jwt_tokens().validate(&output.jwt_token).unwrap(), 7);
}

#[tokio::test]
async fn test_login_unknown_phone_is_invalid_login() {
    let mut repo = MockUserRepository::new();
    repo.expect_get()
        .returning(|_| Err(RepositoryError::NotFound));
    repo.expect_update().never();
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();

    let service = manager(repo, tokens, MockPasswordHasher::new());
    let result = service
        .login(LoginUser {
            phone_no: PHONE_NO.to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidLogin)));
}

#[tokio::test]
async fn test_login_wrong_password_is_invalid_login() {
    let mut repo = MockUserRepository::new();
    repo.expect_get().returning(|_| Ok(create_test_user(7, 2)));
    repo.expect_update().never();
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| false);

    let service = manager(repo, tokens, hasher);
    let result = service
        .login(LoginUser {
            phone_no: PHONE_NO.to_string(),
            password: "WrongP@ssw0rd".to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::InvalidLogin)));
}

#[tokio::test]
async fn test_login_counter_failure_issues_no_token() {
    let mut repo = MockUserRepository::new();
    repo.expect_get().returning(|_| Ok(create_test_user(7, 2)));
    repo.expect_update()
        .returning(|_| Err(RepositoryError::Database(DbErr::Custom("down".to_string()))));
    let mut tokens = MockTokenService::new();
    tokens.expect_issue().never();
    let mut hasher = MockPasswordHasher::new();
    hasher.expect_verify().returning(|_, _| true);

    let service = manager(repo, tokens, hasher);
    let result = service
        .login(LoginUser {
            phone_no: PHONE_NO.to_string(),
            password: PASSWORD.to_string(),
        })
        .await;

    assert!(matches!(result, Err(AppError::Database(_))));
}

// =============================================================================
// Token validation
// =============================================================================

#[tokio::test]
async fn test_validate_token_delegates() {
    let mut tokens = MockTokenService::new();
    tokens
        .expect_validate()
        .with(eq("good-token"))
        .returning(|_| Ok(42));
    tokens
        .expect_validate()
        .with(eq("bad-token"))
        .returning(|_| Err(AppError::InvalidToken));

    let service = manager(MockUserRepository::new(), tokens, MockPasswordHasher::new());

    let output = service
        .validate_token(ValidateUserToken {
            jwt_token: "good-token".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(output.user_id, 42);

    let result = service
        .validate_token(ValidateUserToken {
            jwt_token: "bad-token".to_string(),
        })
        .await;
    assert!(matches!(result, Err(AppError::InvalidToken)));
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn test_get_profile_projects_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_get()
        .with(eq(UserLookup::Id(7)))
        .returning(|_| Ok(create_test_user(7, 3)));

    let service = manager(repo, MockTokenService::new(), MockPasswordHasher::new());
    let profile = service
        .get_profile(GetUserProfile { user_id: 7 })
        .await
        .unwrap();

    assert_eq!(profile.user_id, 7);
    assert_eq!(profile.phone_no, PHONE_NO);
    assert_eq!(profile.full_name, "John Smith");
    assert_eq!(profile.successful_login_count, 3);
}

#[tokio::test]
async fn test_get_profile_missing_user() {
    let mut repo = MockUserRepository::new();
    repo.expect_get()
        .returning(|_| Err(RepositoryError::NotFound));

    let service = manager(repo, MockTokenService::new(), MockPasswordHasher::new());
    let result = service.get_profile(GetUserProfile { user_id: 404 }).await;

    assert!(matches!(result, Err(AppError::UserNotFound)));
}

#[tokio::test]
async fn test_update_profile_phone_only() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .with(eq(UserChanges {
            phone_no: Some("+628121417330".to_string()),
            ..UserChanges::new(7)
        }))
        .times(1)
        .returning(|_| Ok(()));

    let service = manager(repo, MockTokenService::new(), MockPasswordHasher::new());
    service
        .update_profile(UpdateUserProfile {
            user_id: 7,
            phone_no: Some("+628121417330".to_string()),
            full_name: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_profile_validates_supplied_fields_only() {
    let mut repo = MockUserRepository::new();
    repo.expect_update().never();

    let service = manager(repo, MockTokenService::new(), MockPasswordHasher::new());
    let result = service
        .update_profile(UpdateUserProfile {
            user_id: 7,
            phone_no: None,
            full_name: Some("L".to_string()),
        })
        .await;

    let Err(AppError::Validation(errors)) = result else {
        panic!("expected validation error");
    };
    assert_eq!(
        errors.field("full_name"),
        ["full_name must be between 3 and 60 characters long"]
    );
    assert!(errors.field("phone_no").is_empty());
}

#[tokio::test]
async fn test_update_profile_maps_repository_outcomes() {
    let mut repo = MockUserRepository::new();
    repo.expect_update()
        .with(eq(UserChanges {
            full_name: Some("Jane Smith".to_string()),
            ..UserChanges::new(404)
        }))
        .returning(|_| Err(RepositoryError::NotFound));
    repo.expect_update()
        .with(eq(UserChanges {
            phone_no: Some("+628121417330".to_string()),
            ..UserChanges::new(7)
        }))
        .returning(|_| Err(RepositoryError::Conflict));

    let service = manager(repo, MockTokenService::new(), MockPasswordHasher::new());

    let missing = service
        .update_profile(UpdateUserProfile {
            user_id: 404,
            full_name: Some("Jane Smith".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(missing, Err(AppError::UserNotFound)));

    let taken = service
        .update_profile(UpdateUserProfile {
            user_id: 7,
            phone_no: Some("+628121417330".to_string()),
            ..Default::default()
        })
        .await;
    assert!(matches!(taken, Err(AppError::UserConflict)));
}
