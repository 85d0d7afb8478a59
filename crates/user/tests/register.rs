use foodgram_shared::Error;
use temp_dir::TempDir;

mod helpers;

fn field_message(err: Error, field: &str) -> Option<String> {
    let Error::Validate(errors) = err else {
        return None;
    };

    errors
        .field_errors()
        .get(field)
        .and_then(|errors| errors.first())
        .and_then(|error| error.message.as_ref().map(|m| m.to_string()))
}

#[tokio::test]
async fn register_returns_created_user() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state);

    let user = cmd.register(helpers::register_input("john")).await?;

    assert_eq!(user.email, "john@foodgram.localhost");
    assert_eq!(user.username, "john");
    assert_eq!(user.first_name, "John");

    let (password,): (String,) = sqlx::query_as(r#"SELECT password FROM "user" WHERE id = ?1"#)
        .bind(user.id)
        .fetch_one(&state.read_db)
        .await?;
    assert!(password.starts_with("$argon2"));

    Ok(())
}

#[tokio::test]
async fn validate_unique_email_and_username() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state);

    cmd.register(helpers::register_input("john")).await?;

    let err = cmd
        .register(helpers::register_input("john"))
        .await
        .unwrap_err();
    assert_eq!(
        field_message(err, "email").as_deref(),
        Some("A user with that email already exists.")
    );

    let mut input = helpers::register_input("john");
    input.email = "other@foodgram.localhost".to_owned();
    let err = cmd.register(input).await.unwrap_err();
    assert_eq!(
        field_message(err, "username").as_deref(),
        Some("A user with that username already exists.")
    );

    Ok(())
}

#[tokio::test]
async fn validate_username() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state);

    let mut input = helpers::register_input("me");
    input.username = "Me".to_owned();
    let err = cmd.register(input).await.unwrap_err();
    assert!(field_message(err, "username").is_some());

    let mut input = helpers::register_input("spaces");
    input.username = "john doe".to_owned();
    let err = cmd.register(input).await.unwrap_err();
    assert!(field_message(err, "username").is_some());

    let mut input = helpers::register_input("unicode");
    input.username = "повар.1@+-".to_owned();
    cmd.register(input).await?;

    Ok(())
}

#[tokio::test]
async fn validate_short_password() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let state = helpers::setup_test_state(dir.child("db.sqlite3")).await?;
    let cmd = helpers::command(&state);

    let mut input = helpers::register_input("john");
    input.password = "short".to_owned();
    let err = cmd.register(input).await.unwrap_err();

    let Error::Validate(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.field_errors().contains_key("password"));

    cmd.register(helpers::register_input("john")).await?;

    Ok(())
}
