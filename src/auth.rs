use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use foodgram_shared::user::AuthUser;

use crate::{error::AppError, routes::AppState};

/// Token from `Authorization: Token <jwt>`, `Bearer` is accepted too.
/// `Ok(None)` when the header is absent.
fn token(parts: &Parts) -> Result<Option<&str>, AppError> {
    let Some(value) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value
        .to_str()
        .map_err(|_| foodgram_shared::Error::Unauthorized)?;

    match value.split_once(' ') {
        Some((scheme, token))
            if scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer") =>
        {
            Ok(Some(token.trim()))
        }
        _ => {
            tracing::warn!("unsupported authorization scheme");
            Err(foodgram_shared::Error::Unauthorized.into())
        }
    }
}

/// Requires an authenticated user.
pub struct Auth(pub AuthUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token(parts)? else {
            return Err(foodgram_shared::Error::Unauthorized.into());
        };

        Ok(Auth(state.user_command.authenticate(token).await?))
    }
}

/// Anonymous access allowed. A token that is present must still be valid.
pub struct MaybeAuth(pub Option<AuthUser>);

impl MaybeAuth {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.id)
    }
}

impl FromRequestParts<AppState> for MaybeAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = token(parts)? else {
            return Ok(MaybeAuth(None));
        };

        Ok(MaybeAuth(Some(
            state.user_command.authenticate(token).await?,
        )))
    }
}
