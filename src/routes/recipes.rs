use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use axum_extra::extract::{Query, WithRejection};
use foodgram_recipe::{CreateInput, IngredientAmountInput, RecipeView, RecipesQuery, UpdateInput};
use foodgram_shared::{recipe::RecipeSummary, user::AuthUser};
use serde::Deserialize;

use super::AppState;
use crate::{
    auth::{Auth, MaybeAuth},
    config::PaginationConfig,
    error::{AppError, AppResult},
    pagination::{PageQuery, PageResponse},
};

/// Accepts `1/0/true/false` in any case.
fn parse_bool(field: &'static str, value: Option<&str>) -> foodgram_shared::Result<bool> {
    match value.map(str::to_ascii_lowercase).as_deref() {
        None | Some("") => Ok(false),
        Some("1" | "true") => Ok(true),
        Some("0" | "false") => Ok(false),
        Some(_) => Err(foodgram_shared::Error::field(
            field,
            "Select a valid choice.",
        )),
    }
}

#[derive(Deserialize, Default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub is_favorited: Option<String>,
    pub is_in_shopping_cart: Option<String>,
}

impl ListQuery {
    fn into_query(
        self,
        viewer: Option<i64>,
        pagination: &PaginationConfig,
    ) -> foodgram_shared::Result<RecipesQuery> {
        let args = PageQuery {
            page: self.page,
            limit: self.limit,
        }
        .args(pagination)?;

        let author = match self.author.as_deref() {
            None | Some("") => None,
            Some(author) => Some(author.parse::<i64>().map_err(|_| {
                foodgram_shared::Error::field("author", "Select a valid choice.")
            })?),
        };

        Ok(RecipesQuery {
            author,
            tags: self.tags.into_iter().filter(|t| !t.is_empty()).collect(),
            is_favorited: parse_bool("is_favorited", self.is_favorited.as_deref())?,
            is_in_shopping_cart: parse_bool(
                "is_in_shopping_cart",
                self.is_in_shopping_cart.as_deref(),
            )?,
            viewer,
            args,
        })
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct CreateBody {
    pub ingredients: Vec<IngredientAmountInput>,
    pub tags: Vec<i64>,
    /// Base64 data URI.
    pub image: String,
    pub name: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateBody {
    pub ingredients: Vec<IngredientAmountInput>,
    pub tags: Vec<i64>,
    pub image: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub cooking_time: Option<i64>,
}

#[derive(Deserialize, Default)]
pub struct DownloadQuery {
    pub format: Option<String>,
}

async fn view(state: &AppState, id: i64, viewer: &AuthUser) -> AppResult<RecipeView> {
    let Some(recipe) = state.recipe_query.find_recipe(id, Some(viewer.id)).await? else {
        foodgram_shared::not_found!("recipe {id}");
    };

    Ok(recipe)
}

pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeAuth,
    uri: Uri,
    WithRejection(Query(query), _): WithRejection<Query<ListQuery>, AppError>,
) -> AppResult<Json<PageResponse<RecipeView>>> {
    let query = query.into_query(viewer.id(), &state.config.pagination)?;
    let page = state.recipe_query.filter_recipes(query).await?;

    Ok(Json(PageResponse::new(
        page,
        &state.config.server.public_url,
        &uri,
    )))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: MaybeAuth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<RecipeView>> {
    let Some(recipe) = state.recipe_query.find_recipe(id, viewer.id()).await? else {
        foodgram_shared::not_found!("recipe {id}");
    };

    Ok(Json(recipe))
}

pub async fn create(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Json(body), _): WithRejection<Json<CreateBody>, AppError>,
) -> AppResult<(StatusCode, Json<RecipeView>)> {
    // An empty image is left to the command's validation
    let image = if body.image.is_empty() {
        String::new()
    } else {
        state.images.save(&body.image).await?
    };

    let result = state
        .recipe_command
        .create(
            &user,
            CreateInput {
                ingredients: body.ingredients,
                tags: body.tags,
                image: image.to_owned(),
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
            },
        )
        .await;

    let id = match result {
        Ok(id) => id,
        Err(e) => {
            state.images.remove(&image).await;
            return Err(e.into());
        }
    };

    Ok((StatusCode::CREATED, Json(view(&state, id, &user).await?)))
}

pub async fn update(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Json(body), _): WithRejection<Json<UpdateBody>, AppError>,
) -> AppResult<Json<RecipeView>> {
    let image = match body.image.as_deref() {
        None | Some("") => None,
        Some(data) => Some(state.images.save(data).await?),
    };

    let result = state
        .recipe_command
        .update(
            &user,
            id,
            UpdateInput {
                ingredients: body.ingredients,
                tags: body.tags,
                image: image.to_owned(),
                name: body.name,
                text: body.text,
                cooking_time: body.cooking_time,
            },
        )
        .await;

    match result {
        Ok(Some(replaced)) => state.images.remove(&replaced).await,
        Ok(None) => {}
        Err(e) => {
            if let Some(image) = image {
                state.images.remove(&image).await;
            }
            return Err(e.into());
        }
    }

    Ok(Json(view(&state, id, &user).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    let image = state.recipe_command.delete(&user, id).await?;
    state.images.remove(&image).await;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_favorite(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let recipe = state.recipe_command.add_favorite(&user, id).await?;

    Ok((StatusCode::CREATED, Json(recipe.with_media(&state.media))))
}

pub async fn remove_favorite(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.recipe_command.remove_favorite(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_to_cart(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<(StatusCode, Json<RecipeSummary>)> {
    let recipe = state.recipe_command.add_to_cart(&user, id).await?;

    Ok((StatusCode::CREATED, Json(recipe.with_media(&state.media))))
}

pub async fn remove_from_cart(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.recipe_command.remove_from_cart(&user, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PDF by default, `?format=txt` for plain text.
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Query(query), _): WithRejection<Query<DownloadQuery>, AppError>,
) -> AppResult<Response> {
    let Some(owner) = state.user_query.find(user.id, None).await? else {
        foodgram_shared::not_found!("user {}", user.id);
    };
    let owner = owner.full_name();
    let items = state.shopping_query.aggregate(user.id).await?;

    tracing::info!(user_id = user.id, items = items.len(), "shopping list exported");

    let response = match query.format.as_deref() {
        Some("txt") => (
            [
                (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"shopping-list.txt\"",
                ),
            ],
            foodgram_shopping::render_text(&owner, &items),
        )
            .into_response(),
        _ => (
            [
                (header::CONTENT_TYPE, "application/pdf"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"shopping-list.pdf\"",
                ),
            ],
            foodgram_shopping::render_pdf(&owner, &items)?,
        )
            .into_response(),
    };

    Ok(response)
}
