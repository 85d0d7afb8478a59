use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use foodgram_user::LoginInput;
use serde::Deserialize;
use serde_json::{Value, json};

use super::AppState;
use crate::{auth::Auth, error::AppError};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<LoginBody>, AppError>,
) -> Result<Json<Value>, AppError> {
    let token = state
        .user_command
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(Json(json!({ "auth_token": token })))
}

pub async fn logout(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<StatusCode, AppError> {
    state.user_command.logout(&user).await?;

    Ok(StatusCode::NO_CONTENT)
}
