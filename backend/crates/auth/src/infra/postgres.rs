//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entity::{
    credentials::Credentials,
    user::{NewUser, User},
};
use crate::domain::repository::{CredentialsRepository, UserRepository};
use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::StoredPassword,
    user_role::UserRole,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Row types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i32,
    user_name: String,
    email: String,
    user_role: String,
    last_login_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        // A bad tag here means corrupt data, not bad input
        let role = UserRole::from_code(&self.user_role)
            .map_err(|e| AuthError::Internal(format!("Corrupt role in database: {e}")))?;

        Ok(User {
            user_id: UserId::from_i32(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            email: Email::from_db(self.email),
            role,
            last_login_at: self.last_login_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CredentialsRow {
    user_id: i32,
    salt: String,
    password_digest: Vec<u8>,
    hash_rounds: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CredentialsRow {
    fn into_credentials(self) -> Credentials {
        Credentials {
            user_id: UserId::from_i32(self.user_id),
            password: StoredPassword::from_parts(
                self.salt,
                self.password_digest,
                self.hash_rounds as u32,
            ),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let now = Utc::now();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                user_name,
                user_name_canonical,
                email,
                user_role,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING
                user_id,
                user_name,
                email,
                user_role,
                last_login_at,
                created_at,
                updated_at
            "#,
        )
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.email.as_str())
        .bind(user.role.code())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        row.into_user()
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                user_role,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                user_name,
                email,
                user_role,
                last_login_at,
                created_at,
                updated_at
            FROM users
            WHERE user_name_canonical = $1
            "#,
        )
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_user_name_or_email(
        &self,
        user_name: &UserName,
        email: &Email,
    ) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE user_name_canonical = $1 OR email = $2)",
        )
        .bind(user_name.canonical())
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn record_login(&self, user_id: &UserId) -> AuthResult<()> {
        let now = Utc::now();

        sqlx::query("UPDATE users SET last_login_at = $2, updated_at = $2 WHERE user_id = $1")
            .bind(user_id.as_i32())
            .bind(now)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Credentials Repository Implementation
// ============================================================================

impl CredentialsRepository for PgAuthRepository {
    async fn create(&self, credentials: &Credentials) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO user_credentials (
                user_id,
                salt,
                password_digest,
                hash_rounds,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(credentials.user_id.as_i32())
        .bind(credentials.password.salt())
        .bind(credentials.password.digest_bytes())
        .bind(credentials.password.rounds() as i32)
        .bind(credentials.created_at)
        .bind(credentials.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> AuthResult<Option<Credentials>> {
        let row = sqlx::query_as::<_, CredentialsRow>(
            r#"
            SELECT
                user_id,
                salt,
                password_digest,
                hash_rounds,
                created_at,
                updated_at
            FROM user_credentials
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_i32())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_credentials()))
    }
}
