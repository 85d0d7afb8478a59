use std::{path::PathBuf, str::FromStr};

use foodgram_shared::{State, user::AuthUser};
use foodgram_user::{RegisterInput, jwt::TokenConfig};
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

pub fn token_config() -> TokenConfig {
    TokenConfig {
        secret: "test-secret-test-secret-test-secret".to_owned(),
        issuer: "foodgram".to_owned(),
        audience: "foodgram-api".to_owned(),
        expiration_days: 1,
    }
}

pub fn command(state: &State) -> foodgram_user::Command {
    foodgram_user::Command::new(state.clone(), token_config())
}

pub fn register_input(name: &str) -> RegisterInput {
    RegisterInput {
        email: format!("{name}@foodgram.localhost"),
        username: name.to_owned(),
        first_name: "John".to_owned(),
        last_name: "Doe".to_owned(),
        password: "my_password".to_owned(),
    }
}

#[allow(dead_code)]
pub async fn create_user(state: &State, name: &str) -> anyhow::Result<AuthUser> {
    let cmd = command(state);
    cmd.register(register_input(name)).await?;
    let token = cmd
        .login(foodgram_user::LoginInput {
            email: format!("{name}@foodgram.localhost"),
            password: "my_password".to_owned(),
        })
        .await?;

    Ok(cmd.authenticate(&token).await?)
}

#[allow(dead_code)]
pub async fn insert_recipe(state: &State, author_id: i64, name: &str, created_at: i64) -> anyhow::Result<i64> {
    let result = sqlx::query(
        "INSERT INTO recipe (author_id, name, image, text, cooking_time, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(author_id)
    .bind(name)
    .bind(format!("recipes/{name}.png"))
    .bind("text")
    .bind(10)
    .bind(created_at)
    .execute(&state.write_db)
    .await?;

    Ok(result.last_insert_rowid())
}
