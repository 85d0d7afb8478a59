use foodgram_db::table::{Ingredient, RecipeIngredient, ShoppingCart};
use sea_query::{Expr, ExprTrait, Func, JoinType, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShoppingItem {
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Clone)]
pub struct Query(pub SqlitePool);

impl Query {
    /// Sums the amounts of every ingredient over the recipes in the user's
    /// cart, one line per ingredient, ordered by name.
    pub async fn aggregate(&self, user_id: i64) -> foodgram_shared::Result<Vec<ShoppingItem>> {
        let statement = sea_query::Query::select()
            .columns([
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .expr(Func::sum(Expr::col((
                RecipeIngredient::Table,
                RecipeIngredient::Amount,
            ))))
            .from(RecipeIngredient::Table)
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .join(
                JoinType::InnerJoin,
                ShoppingCart::Table,
                Expr::col((ShoppingCart::Table, ShoppingCart::RecipeId))
                    .equals((RecipeIngredient::Table, RecipeIngredient::RecipeId)),
            )
            .and_where(Expr::col((ShoppingCart::Table, ShoppingCart::UserId)).eq(user_id))
            .group_by_col((Ingredient::Table, Ingredient::Id))
            .order_by_expr(Expr::col((Ingredient::Table, Ingredient::Name)), Order::Asc)
            .order_by_expr(
                Expr::col((Ingredient::Table, Ingredient::MeasurementUnit)),
                Order::Asc,
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, String, i64), _>(&sql, values)
            .fetch_all(&self.0)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, measurement_unit, amount)| ShoppingItem {
                name,
                measurement_unit,
                amount,
            })
            .collect())
    }
}
