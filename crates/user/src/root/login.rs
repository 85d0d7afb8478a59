use foodgram_shared::user::AuthUser;
use ulid::Ulid;
use validator::Validate;

use crate::{
    jwt,
    repository::{self, FindType},
};

const INVALID_CREDENTIALS: &str = "Unable to log in with provided credentials.";

#[derive(Validate)]
pub struct LoginInput {
    #[validate(length(min = 1))]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl super::Command {
    /// Opens a session and returns its signed token.
    pub async fn login(&self, input: LoginInput) -> foodgram_shared::Result<String> {
        input.validate()?;

        let Some(row) = repository::find(&self.read_db, FindType::Email(input.email)).await? else {
            return Err(foodgram_shared::Error::field(
                "non_field_errors",
                INVALID_CREDENTIALS,
            ));
        };

        if !super::password::verify(&input.password, &row.password)? {
            return Err(foodgram_shared::Error::field(
                "non_field_errors",
                INVALID_CREDENTIALS,
            ));
        }

        let access_id = Ulid::new().to_string();
        repository::create_login(&self.write_db, &access_id, row.id).await?;

        tracing::info!(user_id = row.id, "user logged in");

        Ok(jwt::generate(&self.token, row.id, &access_id)?)
    }

    pub async fn logout(&self, user: &AuthUser) -> foodgram_shared::Result<()> {
        repository::delete_login(&self.write_db, &user.access_id).await?;

        tracing::info!(user_id = user.id, "user logged out");

        Ok(())
    }

    /// Resolves a bearer token into the user it was issued to. Tokens whose
    /// session was closed by `logout` are rejected.
    pub async fn authenticate(&self, token: &str) -> foodgram_shared::Result<AuthUser> {
        let claims = match jwt::verify(&self.token, token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(err = %e, "rejected token");
                return Err(foodgram_shared::Error::Unauthorized);
            }
        };

        let Ok(id) = claims.sub.parse::<i64>() else {
            tracing::warn!(sub = %claims.sub, "token subject is not a user id");
            return Err(foodgram_shared::Error::Unauthorized);
        };

        let Some(role) = repository::find_login_role(&self.read_db, &claims.jti, id).await? else {
            return Err(foodgram_shared::Error::Unauthorized);
        };

        Ok(AuthUser {
            id,
            access_id: claims.jti,
            role,
        })
    }
}
