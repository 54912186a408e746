//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use platform::cipher::PayloadCipher;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_issuer::TokenIssuer;
use crate::application::{SignInInput, SignInUseCase, SignUpInput, SignUpUseCase};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{email::Email, principal::Principal, user_name::UserName};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ExistsQuery, ExistsResponse, MeResponse, SignInRequest, SignInResponse, SignUpRequest,
    SignUpResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + CredentialsRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    /// Built once at router construction; key derivation is iterated
    pub cipher: PayloadCipher,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: UserRepository + CredentialsRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone());

    let input = SignUpInput {
        user_name: req.user_name,
        email: req.email,
        password: req.password,
        user_type: req.user_type,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SignUpResponse {
        user_id: output.user_id,
        user_type: output.role,
    }))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<Json<SignInResponse>>
where
    R: UserRepository + CredentialsRepository + Clone + Send + Sync + 'static,
{
    let issuer = TokenIssuer::new(state.config.clone(), state.cipher.clone());
    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), issuer);

    let input = SignInInput {
        user_name: req.user_name,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(Json(SignInResponse {
        token: output.token,
        expires_at_ms: output.expires_at_ms,
    }))
}

// ============================================================================
// Existence probe
// ============================================================================

/// GET /api/auth/exists?userName=&email=
///
/// Registration UI probe. Values that fail validation cannot belong to
/// an account, so they simply report `exists: false`.
pub async fn user_exists<R>(
    State(state): State<AuthAppState<R>>,
    Query(query): Query<ExistsQuery>,
) -> AuthResult<Json<ExistsResponse>>
where
    R: UserRepository + CredentialsRepository + Clone + Send + Sync + 'static,
{
    let exists = match (UserName::new(&query.user_name), Email::new(query.email)) {
        (Ok(user_name), Ok(email)) => {
            state
                .repo
                .exists_by_user_name_or_email(&user_name, &email)
                .await?
        }
        _ => false,
    };

    Ok(Json(ExistsResponse { exists }))
}

// ============================================================================
// Current principal
// ============================================================================

/// GET /api/auth/me (protected)
///
/// The principal arrives as an explicit extractor argument, recovered
/// from the request's own token by the auth middleware.
pub async fn me(principal: Principal) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: principal.user_id,
        user_name: principal.user_name,
        role: principal.role,
    })
}
