use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use foodgram_shared::user::AuthUser;
use validator::Validate;

use crate::repository::{self, FindType};

pub(crate) fn hash(password: &str) -> foodgram_shared::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    Ok(argon2.hash_password(password.as_bytes(), &salt)?.to_string())
}

pub(crate) fn verify(password: &str, hash: &str) -> foodgram_shared::Result<bool> {
    let parsed_hash = PasswordHash::new(hash)?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
    #[validate(length(min = 1))]
    pub current_password: String,
}

impl super::Command {
    pub async fn set_password(
        &self,
        user: &AuthUser,
        input: SetPasswordInput,
    ) -> foodgram_shared::Result<()> {
        input.validate()?;

        let Some(row) = repository::find(&self.read_db, FindType::Id(user.id)).await? else {
            foodgram_shared::not_found!("user {}", user.id);
        };

        if !verify(&input.current_password, &row.password)? {
            return Err(foodgram_shared::Error::field(
                "current_password",
                "Invalid password.",
            ));
        }

        repository::update(
            &self.write_db,
            repository::UpdateInput {
                id: user.id,
                password: Some(hash(&input.new_password)?),
                role: None,
            },
        )
        .await?;

        tracing::info!(user_id = user.id, "password changed");

        Ok(())
    }
}
