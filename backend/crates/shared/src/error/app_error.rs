//! Application Error - Unified error type for the application
//!
//! [`AppError`] is the envelope every module-level error is folded into
//! before it leaves the process: a classification ([`ErrorKind`]), a
//! user-facing message, an optional suggested action and an optional
//! source error kept for logs only.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::kind::ErrorKind;

/// アプリケーション統一エラー型。ビルダースタイルで組み立てる。
///
/// ## Examples
/// ```rust
/// use kernel::error::app_error::AppError;
///
/// let err = AppError::unauthorized("Token expired")
///     .with_action("Please sign in again");
/// assert_eq!(err.status_code(), 401);
/// ```
pub struct AppError {
    kind: ErrorKind,
    message: Cow<'static, str>,
    /// ユーザーが取るべきアクション（任意）
    action: Option<Cow<'static, str>>,
    /// 元のエラー。レスポンスには出さない、ログ専用。
    source: Option<Box<dyn Error + Send + Sync + 'static>>,
}

/// `Result<T, AppError>` の別名
pub type AppResult<T> = Result<T, AppError>;

macro_rules! constructors {
    ($($(#[$doc:meta])* $name:ident => $kind:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            #[inline]
            pub fn $name(message: impl Into<Cow<'static, str>>) -> Self {
                Self::new(ErrorKind::$kind, message)
            }
        )*
    };
}

impl AppError {
    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            message: message.into(),
            action: None,
            source: None,
        }
    }

    constructors! {
        /// 400 Bad Request
        bad_request => BadRequest,
        /// 401 Unauthorized
        unauthorized => Unauthorized,
        /// 403 Forbidden
        forbidden => Forbidden,
        /// 404 Not Found
        not_found => NotFound,
        /// 409 Conflict
        conflict => Conflict,
        /// 422 Unprocessable Entity
        unprocessable => UnprocessableEntity,
        /// 500 Internal Server Error
        internal => InternalServerError,
        /// 503 Service Unavailable
        service_unavailable => ServiceUnavailable,
    }

    /// ユーザー向けアクションを付与
    #[inline]
    pub fn with_action(mut self, action: impl Into<Cow<'static, str>>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// 元のエラーを付与（ログ用）
    #[inline]
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    #[inline]
    pub fn is_server_error(&self) -> bool {
        self.kind.is_server_error()
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut builder = f.debug_struct("AppError");
        builder.field("kind", &self.kind);
        builder.field("message", &self.message);
        if let Some(action) = &self.action {
            builder.field("action", action);
        }
        if let Some(source) = &self.source {
            builder.field("source", source);
        }
        builder.finish()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)?;
        if let Some(action) = &self.action {
            write!(f, " (Action: {})", action)?;
        }
        Ok(())
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_map_to_expected_codes() {
        assert_eq!(AppError::bad_request("x").status_code(), 400);
        assert_eq!(AppError::unauthorized("x").status_code(), 401);
        assert_eq!(AppError::forbidden("x").status_code(), 403);
        assert_eq!(AppError::not_found("x").status_code(), 404);
        assert_eq!(AppError::conflict("x").status_code(), 409);
        assert_eq!(AppError::unprocessable("x").status_code(), 422);
        assert_eq!(AppError::internal("x").status_code(), 500);
        assert_eq!(AppError::service_unavailable("x").status_code(), 503);
    }

    #[test]
    fn display_includes_kind_message_and_action() {
        let err = AppError::unauthorized("Invalid credentials");
        assert_eq!(err.to_string(), "[Unauthorized] Invalid credentials");

        let err = err.with_action("Check your user name and password");
        assert!(err.to_string().ends_with("(Action: Check your user name and password)"));
    }

    #[test]
    fn source_is_preserved_for_logs() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = AppError::internal("Startup failed").with_source(io_err);
        assert!(err.source().is_some());
        // But never leaks into the user-facing message
        assert!(!err.to_string().contains("boom"));
    }

    #[test]
    fn accessors() {
        let err = AppError::not_found("No such pet");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "No such pet");
        assert_eq!(err.action(), None);
        assert!(!err.is_server_error());
    }
}
