use axum::{
    Json,
    extract::{Path, State},
};
use axum_extra::extract::WithRejection;
use foodgram_recipe::TagView;

use super::AppState;
use crate::error::{AppError, AppResult};

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TagView>>> {
    Ok(Json(state.recipe_query.tags().await?))
}

pub async fn detail(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<TagView>> {
    let Some(tag) = state.recipe_query.find_tag(id).await? else {
        foodgram_shared::not_found!("tag {id}");
    };

    Ok(Json(tag))
}
