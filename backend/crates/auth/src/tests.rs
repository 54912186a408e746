//! Use-case tests over an in-memory repository
//!
//! Covers the full register -> login -> validate flow without a
//! database. The Postgres implementation is exercised against a real
//! instance in deployment environments.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::TokenIssuer;
use crate::application::token_validator::TokenValidator;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::entity::credentials::Credentials;
use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// In-memory repository
// ============================================================================

#[derive(Default)]
struct Store {
    users: Vec<User>,
    credentials: HashMap<i32, Credentials>,
    next_id: i32,
}

#[derive(Clone, Default)]
struct InMemoryRepository {
    inner: Arc<Mutex<Store>>,
}

impl UserRepository for InMemoryRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut store = self.inner.lock().unwrap();
        store.next_id += 1;
        let now = Utc::now();
        let user = User {
            user_id: UserId::from_i32(store.next_id),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            role: user.role,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        store.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let store = self.inner.lock().unwrap();
        Ok(store
            .users
            .iter()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> AuthResult<bool> {
        let store = self.inner.lock().unwrap();
        Ok(store.users.iter().any(|u| {
            u.user_name.canonical() == user_name.canonical() || u.email == *email
        }))
    }

    async fn record_login(&self, user_id: &UserId) -> AuthResult<()> {
        let mut store = self.inner.lock().unwrap();
        let now = Utc::now();
        if let Some(user) = store.users.iter_mut().find(|u| u.user_id == *user_id) {
            user.last_login_at = Some(now);
            user.updated_at = now;
        }
        Ok(())
    }
}

impl CredentialsRepository for InMemoryRepository {
    async fn create(&self, credentials: &Credentials) -> AuthResult<()> {
        let mut store = self.inner.lock().unwrap();
        store
            .credentials
            .insert(credentials.user_id.as_i32(), credentials.clone());
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        let store = self.inner.lock().unwrap();
        Ok(store.credentials.get(&user_id.as_i32()).cloned())
    }
}

// ============================================================================
// Fixture
// ============================================================================

struct Fixture {
    repo: Arc<InMemoryRepository>,
    sign_up: SignUpUseCase<InMemoryRepository, InMemoryRepository>,
    sign_in: SignInUseCase<InMemoryRepository, InMemoryRepository>,
    validator: TokenValidator,
}

fn fixture() -> Fixture {
    let config = Arc::new(AuthConfig::development());
    let cipher = config.payload_cipher();
    let repo = Arc::new(InMemoryRepository::default());

    Fixture {
        repo: repo.clone(),
        sign_up: SignUpUseCase::new(repo.clone(), repo.clone()),
        sign_in: SignInUseCase::new(
            repo.clone(),
            repo,
            TokenIssuer::new(config.clone(), cipher.clone()),
        ),
        validator: TokenValidator::new(config, cipher),
    }
}

fn sign_up_input(user_name: &str, email: &str, user_type: &str) -> SignUpInput {
    SignUpInput {
        user_name: user_name.to_string(),
        email: email.to_string(),
        password: "Secret#123A".to_string(),
        user_type: user_type.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn register_login_and_recover_principal() {
    let f = fixture();

    let registered = f
        .sign_up
        .execute(sign_up_input("ana", "ana@example.com", "Adoptante"))
        .await
        .unwrap();
    assert_eq!(registered.role, UserRole::Adoptante);

    let signed_in = f
        .sign_in
        .execute(SignInInput {
            user_name: "ana".to_string(),
            password: "Secret#123A".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(signed_in.user_id, registered.user_id);

    let validated = f.validator.validate(&signed_in.token).unwrap();
    assert_eq!(validated.authenticated_user_id(), registered.user_id);
    assert_eq!(validated.principal().user_name, "ana");
    assert_eq!(validated.principal().role, UserRole::Adoptante);

    // Login is recorded
    let user = f
        .repo
        .find_by_id(&registered.user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(user.last_login_at.is_some());
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let f = fixture();
    f.sign_up
        .execute(sign_up_input("ana", "ana@example.com", "Adoptante"))
        .await
        .unwrap();

    let err = f
        .sign_in
        .execute(SignInInput {
            user_name: "ana".to_string(),
            password: "Secret#123B".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn unknown_user_is_indistinguishable_from_wrong_password() {
    let f = fixture();

    let err = f
        .sign_in
        .execute(SignInInput {
            user_name: "nobody".to_string(),
            password: "Secret#123A".to_string(),
        })
        .await
        .unwrap_err();
    // Same variant, same message as the wrong-password case
    assert!(matches!(err, AuthError::InvalidCredentials));
}

#[tokio::test]
async fn login_is_case_insensitive_on_user_name() {
    let f = fixture();
    f.sign_up
        .execute(sign_up_input("AnaLopez", "ana@example.com", "Adoptante"))
        .await
        .unwrap();

    let signed_in = f
        .sign_in
        .execute(SignInInput {
            user_name: "analopez".to_string(),
            password: "Secret#123A".to_string(),
        })
        .await
        .unwrap();

    // Principal carries the display form, not the canonical one
    let validated = f.validator.validate(&signed_in.token).unwrap();
    assert_eq!(validated.principal().user_name, "AnaLopez");
}

#[tokio::test]
async fn duplicate_user_name_rejected() {
    let f = fixture();
    f.sign_up
        .execute(sign_up_input("ana", "ana@example.com", "Adoptante"))
        .await
        .unwrap();

    // Same name, different case, different email
    let err = f
        .sign_up
        .execute(sign_up_input("ANA", "other@example.com", "Refugio"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserExists));
}

#[tokio::test]
async fn duplicate_email_rejected() {
    let f = fixture();
    f.sign_up
        .execute(sign_up_input("ana", "ana@example.com", "Adoptante"))
        .await
        .unwrap();

    let err = f
        .sign_up
        .execute(sign_up_input("otro", "ana@example.com", "Refugio"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserExists));
}

#[tokio::test]
async fn unknown_role_rejected() {
    let f = fixture();

    let err = f
        .sign_up
        .execute(sign_up_input("ana", "ana@example.com", "Admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidRole(_)));
}

#[tokio::test]
async fn weak_password_rejected() {
    let f = fixture();

    let err = f
        .sign_up
        .execute(SignUpInput {
            user_name: "ana".to_string(),
            email: "ana@example.com".to_string(),
            password: "alllowercase".to_string(),
            user_type: "Adoptante".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::PasswordPolicy(_)));

    // Nothing was persisted
    assert!(
        !f.repo
            .exists_by_user_name_or_email(
                &UserName::new("ana").unwrap(),
                &Email::new("ana@example.com").unwrap(),
            )
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn invalid_email_rejected() {
    let f = fixture();

    let err = f
        .sign_up
        .execute(sign_up_input("ana", "not-an-email", "Adoptante"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail(_)));
}

#[tokio::test]
async fn shelter_role_flows_through_token() {
    let f = fixture();
    f.sign_up
        .execute(sign_up_input(
            "refugio.norte",
            "norte@example.com",
            "Refugio",
        ))
        .await
        .unwrap();

    let signed_in = f
        .sign_in
        .execute(SignInInput {
            user_name: "refugio.norte".to_string(),
            password: "Secret#123A".to_string(),
        })
        .await
        .unwrap();

    let validated = f.validator.validate(&signed_in.token).unwrap();
    assert_eq!(validated.principal().role, UserRole::Refugio);
    assert!(validated.principal().role.is_shelter());
}
