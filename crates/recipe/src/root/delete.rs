use foodgram_db::table::Recipe;
use foodgram_shared::user::AuthUser;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

impl super::Command {
    /// Deletes the recipe with its links and returns its image path.
    pub async fn delete(&self, user: &AuthUser, id: i64) -> foodgram_shared::Result<String> {
        let Some((author_id, image)) = self.find_owner(id).await? else {
            foodgram_shared::not_found!("recipe {id}");
        };

        if !user.can_edit(author_id) {
            foodgram_shared::forbidden!("user {} cannot delete recipe {id}", user.id);
        }

        let statement = Query::delete()
            .from_table(Recipe::Table)
            .and_where(Expr::col(Recipe::Id).eq(id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        tracing::info!(recipe_id = id, user_id = user.id, "recipe deleted");

        Ok(image)
    }
}
