use std::{collections::HashSet, ops::Deref};

use foodgram_db::table::{Ingredient, Tag};
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::{Deserialize, Serialize};
use validator::ValidationError;

mod create;
mod delete;
mod update;

pub use create::CreateInput;
pub use update::UpdateInput;

#[derive(Clone)]
pub struct Command(pub foodgram_shared::State);

impl Deref for Command {
    type Target = foodgram_shared::State;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngredientAmountInput {
    pub id: i64,
    pub amount: i64,
}

fn validate_ingredients(ingredients: &[IngredientAmountInput]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    for ingredient in ingredients {
        if !(1..=32000).contains(&ingredient.amount) {
            return Err(ValidationError::new("amount_range")
                .with_message("Amount must be between 1 and 32000.".into()));
        }

        if !seen.insert(ingredient.id) {
            return Err(ValidationError::new("duplicate_ingredient")
                .with_message("Ingredients must not repeat.".into()));
        }
    }

    Ok(())
}

fn validate_tags(tags: &[i64]) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();

    if !tags.iter().all(|id| seen.insert(*id)) {
        return Err(ValidationError::new("duplicate_tag")
            .with_message("Tags must not repeat.".into()));
    }

    Ok(())
}

impl Command {
    /// Every referenced ingredient and tag must exist.
    async fn ensure_links_exist(
        &self,
        ingredients: &[IngredientAmountInput],
        tags: &[i64],
    ) -> foodgram_shared::Result<()> {
        let ids = ingredients.iter().map(|i| i.id).collect::<Vec<_>>();
        let statement = Query::select()
            .column(Ingredient::Id)
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).is_in(ids.clone()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let found = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect::<HashSet<_>>();

        if let Some(missing) = ids.iter().find(|id| !found.contains(id)) {
            return Err(foodgram_shared::Error::field(
                "ingredients",
                format!("Ingredient {missing} does not exist."),
            ));
        }

        let statement = Query::select()
            .column(Tag::Id)
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).is_in(tags.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let found = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect::<HashSet<_>>();

        if let Some(missing) = tags.iter().find(|id| !found.contains(id)) {
            return Err(foodgram_shared::Error::field(
                "tags",
                format!("Tag {missing} does not exist."),
            ));
        }

        Ok(())
    }
}

/// Replaces the tag and ingredient links of a recipe inside `tx`.
async fn write_links(
    tx: &mut sqlx::SqliteConnection,
    recipe_id: i64,
    ingredients: &[IngredientAmountInput],
    tags: &[i64],
) -> foodgram_shared::Result<()> {
    use foodgram_db::table::{RecipeIngredient, RecipeTag};

    let statement = Query::delete()
        .from_table(RecipeTag::Table)
        .and_where(Expr::col(RecipeTag::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let statement = Query::delete()
        .from_table(RecipeIngredient::Table)
        .and_where(Expr::col(RecipeIngredient::RecipeId).eq(recipe_id))
        .to_owned();
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let mut statement = Query::insert()
        .into_table(RecipeTag::Table)
        .columns([RecipeTag::RecipeId, RecipeTag::TagId])
        .to_owned();
    for tag_id in tags {
        statement.values_panic([recipe_id.into(), (*tag_id).into()]);
    }
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    let mut statement = Query::insert()
        .into_table(RecipeIngredient::Table)
        .columns([
            RecipeIngredient::RecipeId,
            RecipeIngredient::IngredientId,
            RecipeIngredient::Amount,
        ])
        .to_owned();
    for ingredient in ingredients {
        statement.values_panic([
            recipe_id.into(),
            ingredient.id.into(),
            ingredient.amount.into(),
        ]);
    }
    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(&mut *tx).await?;

    Ok(())
}
