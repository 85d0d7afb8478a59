use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::{Query, WithRejection};
use foodgram_recipe::IngredientView;
use serde::Deserialize;

use super::AppState;
use crate::error::{AppError, AppResult};

#[derive(Deserialize, Default)]
pub struct SearchQuery {
    pub name: Option<String>,
}

/// Autocomplete, not paginated.
pub async fn list(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, AppError>,
) -> AppResult<Json<Vec<IngredientView>>> {
    Ok(Json(
        state
            .recipe_query
            .search_ingredients(query.name.as_deref())
            .await?,
    ))
}

pub async fn detail(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<IngredientView>> {
    let Some(ingredient) = state.recipe_query.find_ingredient(id).await? else {
        foodgram_shared::not_found!("ingredient {id}");
    };

    Ok(Json(ingredient))
}
