use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use validator::Validate;

use crate::repository::{self, FindType};

static RE_USERNAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").unwrap());

/// `me` is routed to the current user and can never be a username.
fn validate_not_me(username: &str) -> Result<(), validator::ValidationError> {
    if username.eq_ignore_ascii_case("me") {
        return Err(validator::ValidationError::new("username_reserved")
            .with_message("Username \"me\" is not allowed.".into()));
    }

    Ok(())
}

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(email, length(max = 254))]
    pub email: String,
    #[validate(
        length(min = 1, max = 150),
        regex(
            path = *RE_USERNAME,
            message = "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
        ),
        custom(function = "validate_not_me")
    )]
    pub username: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserCreated {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

/// A concurrent registration can still hit the unique indexes after the
/// checks above. Report it on the field that collided.
fn duplicate_field(e: foodgram_shared::Error) -> foodgram_shared::Error {
    let column = e.unique_violation_column().map(str::to_owned);

    match column.as_deref() {
        Some("username") => foodgram_shared::Error::field(
            "username",
            "A user with that username already exists.",
        ),
        Some(_) => {
            foodgram_shared::Error::field("email", "A user with that email already exists.")
        }
        None => e,
    }
}

impl super::Command {
    pub async fn register(&self, input: RegisterInput) -> foodgram_shared::Result<UserCreated> {
        input.validate()?;

        if repository::exists(&self.read_db, FindType::Email(input.email.to_owned())).await? {
            return Err(foodgram_shared::Error::field(
                "email",
                "A user with that email already exists.",
            ));
        }

        if repository::exists(&self.read_db, FindType::Username(input.username.to_owned())).await?
        {
            return Err(foodgram_shared::Error::field(
                "username",
                "A user with that username already exists.",
            ));
        }

        let password_hash = super::password::hash(&input.password)?;

        let id = repository::create(
            &self.write_db,
            repository::CreateInput {
                email: input.email.to_owned(),
                username: input.username.to_owned(),
                first_name: input.first_name.to_owned(),
                last_name: input.last_name.to_owned(),
                password: password_hash,
            },
        )
        .await
        .map_err(duplicate_field)?;

        tracing::info!(user_id = id, username = %input.username, "user registered");

        Ok(UserCreated {
            email: input.email,
            id,
            username: input.username,
            first_name: input.first_name,
            last_name: input.last_name,
        })
    }
}
