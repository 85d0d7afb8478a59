use foodgram_db::table::Recipe;
use foodgram_shared::user::AuthUser;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

use super::{IngredientAmountInput, validate_ingredients, validate_tags};

/// Partial update. Ingredients and tags are always replaced as a whole.
#[derive(Validate)]
pub struct UpdateInput {
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
    pub image: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub text: Option<String>,
    #[validate(range(min = 1, max = 600))]
    pub cooking_time: Option<i64>,
}

impl super::Command {
    /// Returns the image path that was replaced, if any.
    pub async fn update(
        &self,
        user: &AuthUser,
        id: i64,
        input: UpdateInput,
    ) -> foodgram_shared::Result<Option<String>> {
        let Some((author_id, current_image)) = self.find_owner(id).await? else {
            foodgram_shared::not_found!("recipe {id}");
        };

        if !user.can_edit(author_id) {
            foodgram_shared::forbidden!("user {} cannot edit recipe {id}", user.id);
        }

        input.validate()?;
        self.ensure_links_exist(&input.ingredients, &input.tags)
            .await?;

        let mut statement = Query::update()
            .table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let mut changed = false;

        if let Some(name) = input.name {
            statement.value(Recipe::Name, name);
            changed = true;
        }

        if let Some(text) = input.text {
            statement.value(Recipe::Text, text);
            changed = true;
        }

        if let Some(cooking_time) = input.cooking_time {
            statement.value(Recipe::CookingTime, cooking_time);
            changed = true;
        }

        let replaced_image = match input.image {
            Some(image) if image != current_image => {
                statement.value(Recipe::Image, image);
                changed = true;
                Some(current_image)
            }
            _ => None,
        };

        let mut tx = self.write_db.begin().await?;

        if changed {
            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            sqlx::query_with(&sql, values).execute(&mut *tx).await?;
        }

        super::write_links(&mut tx, id, &input.ingredients, &input.tags).await?;

        tx.commit().await?;

        tracing::info!(recipe_id = id, user_id = user.id, "recipe updated");

        Ok(replaced_image)
    }

    /// Author id and image of a recipe.
    pub(crate) async fn find_owner(&self, id: i64) -> foodgram_shared::Result<Option<(i64, String)>> {
        let statement = Query::select()
            .columns([Recipe::AuthorId, Recipe::Image])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, (i64, String), _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
