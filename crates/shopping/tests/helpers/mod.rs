use std::{path::PathBuf, str::FromStr};

use foodgram_shared::{State, user::AuthUser};
use foodgram_user::{LoginInput, RegisterInput, jwt::TokenConfig};
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePool::connect_with(opts).await?;
    let mut conn = pool.acquire().await?;
    foodgram_db::migrator()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

pub async fn create_user(state: &State, name: &str) -> anyhow::Result<AuthUser> {
    let cmd = foodgram_user::Command::new(
        state.clone(),
        TokenConfig {
            secret: "test-secret-test-secret-test-secret".to_owned(),
            issuer: "foodgram".to_owned(),
            audience: "foodgram-api".to_owned(),
            expiration_days: 1,
        },
    );

    cmd.register(RegisterInput {
        email: format!("{name}@foodgram.localhost"),
        username: name.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        password: "my_password".to_owned(),
    })
    .await?;

    let token = cmd
        .login(LoginInput {
            email: format!("{name}@foodgram.localhost"),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(cmd.authenticate(&token).await?)
}
