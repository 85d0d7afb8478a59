use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, Uri},
};
use axum_extra::extract::{Query, WithRejection};
use foodgram_user::{RegisterInput, SetPasswordInput, Subscription, UserCreated, UserView};
use serde::Deserialize;

use super::AppState;
use crate::{
    auth::{Auth, MaybeAuth},
    error::{AppError, AppResult},
    pagination::{PageQuery, PageResponse},
};

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct RegisterBody {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct SetPasswordBody {
    pub new_password: String,
    pub current_password: String,
}

#[derive(Deserialize, Default)]
pub struct SubscriptionsQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(alias = "recipe_limit")]
    pub recipes_limit: Option<String>,
}

impl SubscriptionsQuery {
    fn page(&self) -> PageQuery {
        PageQuery {
            page: self.page.clone(),
            limit: self.limit.clone(),
        }
    }

    fn recipes_limit(&self) -> foodgram_shared::Result<Option<u64>> {
        match self.recipes_limit.as_deref() {
            None | Some("") => Ok(None),
            Some(limit) => limit.parse::<u64>().map(Some).map_err(|_| {
                foodgram_shared::Error::field("recipes_limit", "A valid integer is required.")
            }),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    viewer: MaybeAuth,
    uri: Uri,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> AppResult<Json<PageResponse<UserView>>> {
    let page = state
        .user_query
        .list(query.args(&state.config.pagination)?, viewer.id())
        .await?;

    Ok(Json(PageResponse::new(
        page,
        &state.config.server.public_url,
        &uri,
    )))
}

pub async fn create(
    State(state): State<AppState>,
    WithRejection(Json(body), _): WithRejection<Json<RegisterBody>, AppError>,
) -> AppResult<(StatusCode, Json<UserCreated>)> {
    let user = state
        .user_command
        .register(RegisterInput {
            email: body.email,
            username: body.username,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn me(State(state): State<AppState>, Auth(user): Auth) -> AppResult<Json<UserView>> {
    let Some(view) = state.user_query.find(user.id, Some(user.id)).await? else {
        foodgram_shared::not_found!("user {}", user.id);
    };

    Ok(Json(view))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: MaybeAuth,
    WithRejection(Path(id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<Json<UserView>> {
    let Some(view) = state.user_query.find(id, viewer.id()).await? else {
        foodgram_shared::not_found!("user {id}");
    };

    Ok(Json(view))
}

pub async fn set_password(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Json(body), _): WithRejection<Json<SetPasswordBody>, AppError>,
) -> AppResult<StatusCode> {
    state
        .user_command
        .set_password(
            &user,
            SetPasswordInput {
                new_password: body.new_password,
                current_password: body.current_password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn subscriptions(
    State(state): State<AppState>,
    Auth(user): Auth,
    uri: Uri,
    WithRejection(Query(query), _): WithRejection<Query<SubscriptionsQuery>, AppError>,
) -> AppResult<Json<PageResponse<Subscription>>> {
    let page = state
        .user_query
        .subscriptions(
            user.id,
            query.page().args(&state.config.pagination)?,
            query.recipes_limit()?,
        )
        .await?;

    Ok(Json(PageResponse::new(
        page,
        &state.config.server.public_url,
        &uri,
    )))
}

pub async fn subscribe(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(author_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(query), _): WithRejection<Query<SubscriptionsQuery>, AppError>,
) -> AppResult<(StatusCode, Json<Subscription>)> {
    let recipes_limit = query.recipes_limit()?;
    state.user_command.subscribe(&user, author_id).await?;

    let Some(subscription) = state
        .user_query
        .subscription(user.id, author_id, recipes_limit)
        .await?
    else {
        foodgram_shared::not_found!("user {author_id}");
    };

    Ok((StatusCode::CREATED, Json(subscription)))
}

pub async fn unsubscribe(
    State(state): State<AppState>,
    Auth(user): Auth,
    WithRejection(Path(author_id), _): WithRejection<Path<i64>, AppError>,
) -> AppResult<StatusCode> {
    state.user_command.unsubscribe(&user, author_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
