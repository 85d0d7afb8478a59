use clap::ValueEnum;
use foodgram::Config;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Role {
    User,
    Admin,
}

impl From<Role> for foodgram_shared::user::Role {
    fn from(value: Role) -> Self {
        match value {
            Role::User => Self::User,
            Role::Admin => Self::Admin,
        }
    }
}

pub async fn set_role(config: Config, email: String, role: Role) -> anyhow::Result<()> {
    let pool = foodgram::db::create_pool(&config.database.url, 1).await?;
    let command = foodgram_user::Command::new(
        foodgram_shared::State::single(pool.clone()),
        config.jwt.into(),
    );

    let result = command.set_role(email.to_owned(), role.into()).await;
    pool.close().await;

    match result {
        Ok(id) => {
            tracing::info!(id, %email, "role updated");
            Ok(())
        }
        Err(foodgram_shared::Error::NotFound(_)) => {
            tracing::error!("user {email} not found");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
