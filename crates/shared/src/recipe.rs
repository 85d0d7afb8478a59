use serde::Serialize;
use sqlx::prelude::FromRow;

/// Short recipe representation used by favorites, the shopping cart and
/// subscriptions.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeSummary {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl RecipeSummary {
    pub fn with_media(mut self, media: &crate::MediaUrl) -> Self {
        self.image = media.resolve(&self.image);
        self
    }
}
