//! Sign In Use Case
//!
//! Authenticates a user and issues a bearer token.

use std::sync::Arc;

use crate::application::token_issuer::TokenIssuer;
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    user_id::UserId, user_name::UserName, user_password::RawPassword,
};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed bearer token
    pub token: String,
    /// Token expiry (Unix timestamp ms)
    pub expires_at_ms: i64,
    pub user_id: UserId,
}

/// Sign in use case
pub struct SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    user_repo: Arc<U>,
    credentials_repo: Arc<C>,
    issuer: TokenIssuer,
}

impl<U, C> SignInUseCase<U, C>
where
    U: UserRepository,
    C: CredentialsRepository,
{
    pub fn new(user_repo: Arc<U>, credentials_repo: Arc<C>, issuer: TokenIssuer) -> Self {
        Self {
            user_repo,
            credentials_repo,
            issuer,
        }
    }

    /// Authenticate and issue a token
    ///
    /// Unknown user, malformed user name and wrong password all surface
    /// as [`AuthError::InvalidCredentials`] so responses cannot be used
    /// to enumerate accounts.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credentials = self
            .credentials_repo
            .find_by_user_id(&user.user_id)
            .await?
            .ok_or_else(|| AuthError::Internal("Credentials not found".to_string()))?;

        let raw_password = RawPassword::for_login(input.password);
        if !credentials.password.verify(&raw_password) {
            return Err(AuthError::InvalidCredentials);
        }

        self.user_repo.record_login(&user.user_id).await?;

        let issued = self.issuer.issue(&user)?;

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed in"
        );

        Ok(SignInOutput {
            token: issued.token,
            expires_at_ms: issued.expires_at_ms,
            user_id: user.user_id,
        })
    }
}
