use foodgram_db::table::{Favorite, Recipe, ShoppingCart};
use foodgram_shared::{recipe::RecipeSummary, user::AuthUser};
use sea_query::{Expr, ExprTrait, IntoIden, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

/// Per-user recipe list table: favorites or the shopping cart.
pub(crate) trait Collection: IntoIden + Copy {
    const NAME: &'static str;
    const TABLE: Self;
    const USER_ID: Self;
    const RECIPE_ID: Self;
}

impl Collection for Favorite {
    const NAME: &'static str = "favorite";
    const TABLE: Self = Favorite::Table;
    const USER_ID: Self = Favorite::UserId;
    const RECIPE_ID: Self = Favorite::RecipeId;
}

impl Collection for ShoppingCart {
    const NAME: &'static str = "shopping_cart";
    const TABLE: Self = ShoppingCart::Table;
    const USER_ID: Self = ShoppingCart::UserId;
    const RECIPE_ID: Self = ShoppingCart::RecipeId;
}

impl crate::Command {
    pub async fn add_favorite(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<RecipeSummary> {
        self.add::<Favorite>(user, recipe_id).await
    }

    pub async fn remove_favorite(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<()> {
        self.remove::<Favorite>(user, recipe_id).await
    }

    pub async fn add_to_cart(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<RecipeSummary> {
        self.add::<ShoppingCart>(user, recipe_id).await
    }

    pub async fn remove_from_cart(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<()> {
        self.remove::<ShoppingCart>(user, recipe_id).await
    }

    async fn add<T: Collection>(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<RecipeSummary> {
        let Some(recipe) = self.find_summary(recipe_id).await? else {
            foodgram_shared::not_found!("recipe {recipe_id}");
        };

        let statement = Query::insert()
            .into_table(T::TABLE)
            .columns([T::USER_ID, T::RECIPE_ID])
            .values_panic([user.id.into(), recipe_id.into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        match sqlx::query_with(&sql, values).execute(&self.write_db).await {
            Ok(_) => {}
            Err(e) if e.as_database_error().is_some_and(|e| e.is_unique_violation()) => {
                foodgram_shared::user!("Recipe already added");
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(list = T::NAME, user_id = user.id, recipe_id, "recipe added");

        Ok(recipe)
    }

    async fn remove<T: Collection>(
        &self,
        user: &AuthUser,
        recipe_id: i64,
    ) -> foodgram_shared::Result<()> {
        if self.find_summary(recipe_id).await?.is_none() {
            foodgram_shared::not_found!("recipe {recipe_id}");
        }

        let statement = Query::delete()
            .from_table(T::TABLE)
            .and_where(Expr::col(T::USER_ID).eq(user.id))
            .and_where(Expr::col(T::RECIPE_ID).eq(recipe_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            foodgram_shared::user!("Recipe is not in the list");
        }

        tracing::info!(list = T::NAME, user_id = user.id, recipe_id, "recipe removed");

        Ok(())
    }

    async fn find_summary(&self, id: i64) -> foodgram_shared::Result<Option<RecipeSummary>> {
        let statement = Query::select()
            .columns([Recipe::Id, Recipe::Name, Recipe::Image, Recipe::CookingTime])
            .from(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, RecipeSummary, _>(&sql, values)
            .fetch_optional(&self.read_db)
            .await?)
    }
}
