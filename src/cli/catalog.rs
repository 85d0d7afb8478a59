use foodgram::Config;
use foodgram_recipe::{NewIngredient, TagInput};

fn command(pool: sqlx::SqlitePool) -> foodgram_recipe::Command {
    foodgram_recipe::Command(foodgram_shared::State::single(pool))
}

pub async fn load_ingredients(config: Config, path: String) -> anyhow::Result<()> {
    let data = tokio::fs::read(&path).await?;
    let items: Vec<NewIngredient> = serde_json::from_slice(&data)?;
    let total = items.len();

    let pool = foodgram::db::create_pool(&config.database.url, 1).await?;
    let inserted = command(pool.clone()).load_ingredients(items).await?;
    pool.close().await;

    tracing::info!(%path, total, inserted, "ingredients loaded");

    Ok(())
}

pub async fn create_tag(
    config: Config,
    name: String,
    color: String,
    slug: String,
) -> anyhow::Result<()> {
    let pool = foodgram::db::create_pool(&config.database.url, 1).await?;
    let result = command(pool.clone())
        .create_tag(TagInput { name, color, slug })
        .await;
    pool.close().await;

    match result {
        Ok(id) => {
            tracing::info!(id, "tag created");
            Ok(())
        }
        Err(foodgram_shared::Error::Validate(errors)) => {
            anyhow::bail!("{}", foodgram::error::validation_body(&errors))
        }
        Err(e) => Err(e.into()),
    }
}
