use foodgram_shared::MediaUrl;
use sqlx::SqlitePool;

mod ingredient;
mod recipe;
mod tag;

pub use ingredient::IngredientView;
pub use recipe::{RecipeIngredientView, RecipeView, RecipesQuery};
pub use tag::TagView;

#[derive(Clone)]
pub struct Query {
    pool: SqlitePool,
    media: MediaUrl,
    users: foodgram_user::Query,
}

impl Query {
    pub fn new(pool: SqlitePool, media: MediaUrl) -> Self {
        Self {
            users: foodgram_user::Query::new(pool.clone(), media.clone()),
            pool,
            media,
        }
    }
}
