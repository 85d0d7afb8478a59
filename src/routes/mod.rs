use axum::{
    Router,
    routing::{get, post},
};
use foodgram_shared::MediaUrl;
use tower_http::services::ServeDir;

use crate::{config::Config, media::ImageStore};

mod auth;
mod health;
mod ingredients;
mod recipes;
mod tags;
mod users;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_command: foodgram_user::Command,
    pub user_query: foodgram_user::Query,
    pub recipe_command: foodgram_recipe::Command,
    pub recipe_query: foodgram_recipe::Query,
    pub shopping_query: foodgram_shopping::Query,
    pub media: MediaUrl,
    pub images: ImageStore,
}

impl AppState {
    pub fn new(config: Config, state: foodgram_shared::State) -> Self {
        let media = MediaUrl::new(config.media_url());

        Self {
            user_command: foodgram_user::Command::new(state.clone(), config.jwt.clone().into()),
            user_query: foodgram_user::Query::new(state.read_db.clone(), media.clone()),
            recipe_command: foodgram_recipe::Command(state.clone()),
            recipe_query: foodgram_recipe::Query::new(state.read_db.clone(), media.clone()),
            shopping_query: foodgram_shopping::Query(state.read_db),
            images: ImageStore::new(&config.media.root),
            media,
            config,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    let media_root = app_state.config.media.root.clone();

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/api/auth/token/login/", post(auth::login))
        .route("/api/auth/token/logout/", post(auth::logout))
        .route("/api/users/", get(users::list).post(users::create))
        .route("/api/users/me/", get(users::me))
        .route("/api/users/set_password/", post(users::set_password))
        .route("/api/users/subscriptions/", get(users::subscriptions))
        .route("/api/users/{id}/", get(users::detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .route("/api/tags/", get(tags::list))
        .route("/api/tags/{id}/", get(tags::detail))
        .route("/api/ingredients/", get(ingredients::list))
        .route("/api/ingredients/{id}/", get(ingredients::detail))
        .route("/api/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(recipes::add_favorite).delete(recipes::remove_favorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .nest_service("/media", ServeDir::new(media_root))
        .with_state(app_state)
}
