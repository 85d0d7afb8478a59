use std::{path::PathBuf, str::FromStr};

use foodgram_recipe::{CreateInput, IngredientAmountInput, NewIngredient, TagInput};
use foodgram_shared::{MediaUrl, State, user::AuthUser};
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

#[allow(dead_code)]
pub fn query(state: &State) -> foodgram_recipe::Query {
    foodgram_recipe::Query::new(state.read_db.clone(), MediaUrl::new("http://h/media"))
}

#[allow(dead_code)]
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

/// Seeds tags `breakfast`, `lunch`, `dinner` and three ingredients. Returns
/// (tag ids, ingredient ids).
#[allow(dead_code)]
pub async fn seed(state: &State) -> anyhow::Result<(Vec<i64>, Vec<i64>)> {
    let cmd = foodgram_recipe::Command(state.clone());

    let mut tags = vec![];
    for (name, color) in [
        ("Breakfast", "#E26C2D"),
        ("Lunch", "#49B64E"),
        ("Dinner", "#8775D2"),
    ] {
        tags.push(
            cmd.create_tag(TagInput {
                name: name.to_owned(),
                color: color.to_owned(),
                slug: name.to_lowercase(),
            })
            .await?,
        );
    }

    cmd.load_ingredients(vec![
        NewIngredient {
            name: "flour".to_owned(),
            measurement_unit: "g".to_owned(),
        },
        NewIngredient {
            name: "milk".to_owned(),
            measurement_unit: "ml".to_owned(),
        },
        NewIngredient {
            name: "eggs".to_owned(),
            measurement_unit: "pcs".to_owned(),
        },
    ])
    .await?;

    let ingredients = sqlx::query_as::<_, (i64,)>("SELECT id FROM ingredient ORDER BY id")
        .fetch_all(&state.read_db)
        .await?
        .into_iter()
        .map(|(id,)| id)
        .collect();

    Ok((tags, ingredients))
}

#[allow(dead_code)]
pub fn create_input(name: &str, tags: Vec<i64>, ingredients: Vec<(i64, i64)>) -> CreateInput {
    CreateInput {
        ingredients: ingredients
            .into_iter()
            .map(|(id, amount)| IngredientAmountInput { id, amount })
            .collect(),
        tags,
        image: format!("recipes/{name}.png"),
        name: name.to_owned(),
        text: format!("How to cook {name}"),
        cooking_time: 15,
    }
}
