use foodgram_db::table::Ingredient;
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct IngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
}

/// Escapes LIKE wildcards; `\` is the escape character.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}

impl super::Query {
    /// Case-insensitive substring search. Names starting with the term come
    /// first, then the rest, each group by name.
    pub async fn search_ingredients(
        &self,
        name: Option<&str>,
    ) -> foodgram_shared::Result<Vec<IngredientView>> {
        let term = name
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty());

        let Some(term) = term else {
            return Ok(sqlx::query_as::<_, IngredientView>(
                "SELECT id, name, measurement_unit FROM ingredient ORDER BY name, measurement_unit",
            )
            .fetch_all(&self.pool)
            .await?);
        };

        let term = escape_like(&term);

        Ok(sqlx::query_as::<_, IngredientView>(
            r"SELECT id, name, measurement_unit FROM ingredient
            WHERE search_name LIKE ?1 ESCAPE '\'
            ORDER BY CASE WHEN search_name LIKE ?2 ESCAPE '\' THEN 0 ELSE 1 END, name, measurement_unit",
        )
        .bind(format!("%{term}%"))
        .bind(format!("{term}%"))
        .fetch_all(&self.pool)
        .await?)
    }

    pub async fn find_ingredient(&self, id: i64) -> foodgram_shared::Result<Option<IngredientView>> {
        let statement = sea_query::Query::select()
            .columns([Ingredient::Id, Ingredient::Name, Ingredient::MeasurementUnit])
            .from(Ingredient::Table)
            .and_where(Expr::col(Ingredient::Id).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, IngredientView, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?)
    }
}
