use foodgram_db::table::Ingredient;
use sea_query::{OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct NewIngredient {
    pub name: String,
    pub measurement_unit: String,
}

impl crate::Command {
    /// Get-or-create by (name, unit). Returns how many rows were inserted.
    pub async fn load_ingredients(
        &self,
        items: Vec<NewIngredient>,
    ) -> foodgram_shared::Result<u64> {
        let mut tx = self.write_db.begin().await?;
        let mut inserted = 0;

        for item in items {
            let name = item.name.trim().to_owned();
            let unit = item.measurement_unit.trim().to_owned();
            if name.is_empty() || unit.is_empty() {
                tracing::warn!(%name, %unit, "skipping incomplete ingredient");
                continue;
            }

            let statement = Query::insert()
                .into_table(Ingredient::Table)
                .columns([
                    Ingredient::Name,
                    Ingredient::MeasurementUnit,
                    Ingredient::SearchName,
                ])
                .values_panic([
                    name.to_owned().into(),
                    unit.into(),
                    name.to_lowercase().into(),
                ])
                .on_conflict(
                    OnConflict::columns([Ingredient::Name, Ingredient::MeasurementUnit])
                        .do_nothing()
                        .to_owned(),
                )
                .to_owned();

            let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
            inserted += sqlx::query_with(&sql, values)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;

        tracing::info!(inserted, "ingredients loaded");

        Ok(inserted)
    }
}
