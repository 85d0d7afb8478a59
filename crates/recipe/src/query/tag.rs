use foodgram_db::table::Tag;
use sea_query::{Expr, ExprTrait, Order, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TagView {
    pub id: i64,
    pub name: String,
    pub color: String,
    pub slug: String,
}

impl super::Query {
    pub async fn tags(&self) -> foodgram_shared::Result<Vec<TagView>> {
        let statement = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .order_by(Tag::Name, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn find_tag(&self, id: i64) -> foodgram_shared::Result<Option<TagView>> {
        let statement = sea_query::Query::select()
            .columns([Tag::Id, Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, TagView, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?)
    }
}
