use foodgram_db::table::Recipe;
use foodgram_shared::user::AuthUser;
use sea_query::{Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;

use super::{IngredientAmountInput, validate_ingredients, validate_tags};

#[derive(Validate)]
pub struct CreateInput {
    #[validate(
        length(min = 1, message = "At least one ingredient is required."),
        custom(function = "validate_ingredients")
    )]
    pub ingredients: Vec<IngredientAmountInput>,
    #[validate(
        length(min = 1, message = "At least one tag is required."),
        custom(function = "validate_tags")
    )]
    pub tags: Vec<i64>,
    /// Media-relative path of the already stored image.
    #[validate(length(min = 1, message = "This field is required."))]
    pub image: String,
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1))]
    pub text: String,
    #[validate(range(min = 1, max = 600))]
    pub cooking_time: i64,
}

impl super::Command {
    pub async fn create(
        &self,
        author: &AuthUser,
        input: CreateInput,
    ) -> foodgram_shared::Result<i64> {
        input.validate()?;
        self.ensure_links_exist(&input.ingredients, &input.tags)
            .await?;

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let statement = Query::insert()
            .into_table(Recipe::Table)
            .columns([
                Recipe::AuthorId,
                Recipe::Name,
                Recipe::Image,
                Recipe::Text,
                Recipe::CookingTime,
                Recipe::CreatedAt,
            ])
            .values_panic([
                author.id.into(),
                input.name.to_owned().into(),
                input.image.into(),
                input.text.into(),
                input.cooking_time.into(),
                now.into(),
            ])
            .to_owned();

        let mut tx = self.write_db.begin().await?;

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

        super::write_links(&mut tx, id, &input.ingredients, &input.tags).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = id, author_id = author.id, name = %input.name, "recipe created");

        Ok(id)
    }
}
