use foodgram_db::table::Subscription;
use foodgram_shared::user::AuthUser;
use sea_query::{Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;

use crate::repository::{self, FindType};

impl crate::Command {
    pub async fn subscribe(&self, user: &AuthUser, author_id: i64) -> foodgram_shared::Result<()> {
        if !repository::exists(&self.read_db, FindType::Id(author_id)).await? {
            foodgram_shared::not_found!("user {author_id}");
        }

        if user.id == author_id {
            foodgram_shared::user!("You cannot subscribe to yourself.");
        }

        let statement = Query::insert()
            .into_table(Subscription::Table)
            .columns([Subscription::UserId, Subscription::AuthorId])
            .values_panic([user.id.into(), author_id.into()])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await;

        match result {
            Ok(_) => {}
            Err(e) if e.as_database_error().is_some_and(|e| e.is_unique_violation()) => {
                foodgram_shared::user!("You are already subscribed to this author.");
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(user_id = user.id, author_id, "subscribed");

        Ok(())
    }

    pub async fn unsubscribe(&self, user: &AuthUser, author_id: i64) -> foodgram_shared::Result<()> {
        if !repository::exists(&self.read_db, FindType::Id(author_id)).await? {
            foodgram_shared::not_found!("user {author_id}");
        }

        let statement = Query::delete()
            .from_table(Subscription::Table)
            .and_where(Expr::col(Subscription::UserId).eq(user.id))
            .and_where(Expr::col(Subscription::AuthorId).eq(author_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let result = sqlx::query_with(&sql, values).execute(&self.write_db).await?;

        if result.rows_affected() == 0 {
            foodgram_shared::user!("You are not subscribed to this author.");
        }

        tracing::info!(user_id = user.id, author_id, "unsubscribed");

        Ok(())
    }
}
