use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] ValidationErrors),

    #[error("{0}")]
    User(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("invalid page")]
    InvalidPage,

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Validation error attached to a single field.
    pub fn field(field: &'static str, message: impl Into<Cow<'static, str>>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new(field).with_message(message.into()));

        Self::Validate(errors)
    }

    /// Column reported by SQLite as `UNIQUE constraint failed: table.column`.
    /// For composite constraints this is the last column.
    pub fn unique_violation_column(&self) -> Option<&str> {
        let Self::Unknown(e) = self else {
            return None;
        };
        let e = e.downcast_ref::<sqlx::Error>()?.as_database_error()?;
        if !e.is_unique_violation() {
            return None;
        }

        e.message().rsplit_once('.').map(|(_, column)| column)
    }

    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Unknown(e) => e
                .downcast_ref::<sqlx::Error>()
                .and_then(|e| e.as_database_error())
                .is_some_and(|e| e.is_unique_violation()),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Unknown(anyhow::anyhow!("{value}"))
    }
}

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)).into())
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)).into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)).into())
    };
}

#[macro_export]
macro_rules! server {
    ($($arg:tt)*) => {
        $crate::bail!($($arg)*)
    };
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::User(format!($msg)).into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::User(format!($fmt, $($arg)*)).into())
    };
}

#[macro_export]
macro_rules! forbidden {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Forbidden(format!($msg)).into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Forbidden(format!($fmt, $($arg)*)).into())
    };
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)).into())
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)).into())
    };
}
