//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token_validator::TokenValidator;
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_bearer_auth};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(repo: PgAuthRepository, config: AuthConfig) -> Router {
    auth_router_generic(repo, config)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, config: AuthConfig) -> Router
where
    R: UserRepository + CredentialsRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let cipher = config.payload_cipher();

    let state = AuthAppState {
        repo: Arc::new(repo),
        config: config.clone(),
        cipher: cipher.clone(),
    };

    let middleware_state = AuthMiddlewareState {
        validator: TokenValidator::new(config, cipher),
    };

    let protected = Router::new().route("/me", get(handlers::me)).route_layer(
        middleware::from_fn_with_state(middleware_state, require_bearer_auth),
    );

    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/signin", post(handlers::sign_in::<R>))
        .route("/exists", get(handlers::user_exists::<R>))
        .merge(protected)
        .with_state(state)
}
