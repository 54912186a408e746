//! Sign Up Use Case
//!
//! Registers a new user account with hashed credentials.

use std::sync::Arc;

use crate::domain::entity::{
    credentials::Credentials,
    user::NewUser,
};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, StoredPassword},
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
    /// Role tag: "Adoptante" or "Refugio"
    pub user_type: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
    pub role: UserRole,
}

/// Sign up use case
pub struct SignUpUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
}

impl<U, C> SignUpUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    pub fn new(user_repo: Arc<U>, credentials_repo: Arc<C>) -> Self {
        Self {
            user_repo,
            credentials_repo,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate the role tag first: it scopes everything else
        let role = UserRole::from_code(&input.user_type)?;

        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;

        // Validate and hash the password before touching the database
        let raw_password = RawPassword::new(input.password)?;
        let stored_password = StoredPassword::from_raw(&raw_password);

        // One combined probe, matching the uniqueness constraint pair
        if self
            .user_repo
            .exists_by_user_name_or_email(&user_name, &email)
            .await?
        {
            return Err(AuthError::UserExists);
        }

        let user = self
            .user_repo
            .create(&NewUser::new(user_name, email, role))
            .await?;

        let credentials = Credentials::new(user.user_id, stored_password);
        self.credentials_repo.create(&credentials).await?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            role = %user.role,
            "User registered"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
            role: user.role,
        })
    }
}
