use foodgram_shared::{MediaUrl, Page, PageArgs, recipe::RecipeSummary};
use serde::Serialize;
use sqlx::{SqlitePool, prelude::FromRow};

/// `?1` is the viewer id, `NULL` for anonymous requests.
const SELECT_USER: &str = r#"SELECT u.id, u.email, u.username, u.first_name, u.last_name,
    EXISTS(SELECT 1 FROM subscription s WHERE s.user_id = ?1 AND s.author_id = u.id) AS is_subscribed
    FROM "user" u"#;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserView {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_subscribed: bool,
}

impl UserView {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// A followed author with their newest recipes.
#[derive(Debug, Clone, Serialize)]
pub struct Subscription {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipeSummary>,
    pub recipes_count: i64,
}

#[derive(Clone)]
pub struct Query {
    pool: SqlitePool,
    media: MediaUrl,
}

impl Query {
    pub fn new(pool: SqlitePool, media: MediaUrl) -> Self {
        Self { pool, media }
    }

    pub async fn find(
        &self,
        id: i64,
        viewer: Option<i64>,
    ) -> foodgram_shared::Result<Option<UserView>> {
        let sql = format!("{SELECT_USER} WHERE u.id = ?2 LIMIT 1");

        Ok(sqlx::query_as::<_, UserView>(&sql)
            .bind(viewer)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    /// Users by id, in no particular order. Unknown ids are skipped.
    pub async fn find_many(
        &self,
        ids: &[i64],
        viewer: Option<i64>,
    ) -> foodgram_shared::Result<Vec<UserView>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let in_clause = (0..ids.len())
            .map(|i| format!("?{}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("{SELECT_USER} WHERE u.id IN ({in_clause})");

        let mut query = sqlx::query_as::<_, UserView>(&sql).bind(viewer);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    pub async fn list(
        &self,
        args: PageArgs,
        viewer: Option<i64>,
    ) -> foodgram_shared::Result<Page<UserView>> {
        let (count,): (i64,) = sqlx::query_as(r#"SELECT COUNT(*) FROM "user""#)
            .fetch_one(&self.pool)
            .await?;
        let count = count as u64;
        args.ensure_within(count)?;

        let sql = format!("{SELECT_USER} ORDER BY u.id LIMIT ?2 OFFSET ?3");
        let results = sqlx::query_as::<_, UserView>(&sql)
            .bind(viewer)
            .bind(args.limit as i64)
            .bind(args.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            args,
            count,
            results,
        })
    }

    /// The author as seen by one of their subscribers.
    pub async fn subscription(
        &self,
        user_id: i64,
        author_id: i64,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Option<Subscription>> {
        let Some(user) = self.find(author_id, Some(user_id)).await? else {
            return Ok(None);
        };

        Ok(Some(self.with_recipes(user, recipes_limit).await?))
    }

    /// Authors the user follows, ordered by id.
    pub async fn subscriptions(
        &self,
        user_id: i64,
        args: PageArgs,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Page<Subscription>> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM subscription WHERE user_id = ?1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        let count = count as u64;
        args.ensure_within(count)?;

        let sql = format!(
            "{SELECT_USER} INNER JOIN subscription f ON f.author_id = u.id WHERE f.user_id = ?1 ORDER BY u.id LIMIT ?2 OFFSET ?3"
        );
        let users = sqlx::query_as::<_, UserView>(&sql)
            .bind(user_id)
            .bind(args.limit as i64)
            .bind(args.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let mut results = Vec::with_capacity(users.len());
        for user in users {
            results.push(self.with_recipes(user, recipes_limit).await?);
        }

        Ok(Page {
            args,
            count,
            results,
        })
    }

    async fn with_recipes(
        &self,
        user: UserView,
        recipes_limit: Option<u64>,
    ) -> foodgram_shared::Result<Subscription> {
        // SQLite treats a negative limit as no limit.
        let limit = recipes_limit
            .map(|l| i64::try_from(l).unwrap_or(i64::MAX))
            .unwrap_or(-1);

        let recipes = sqlx::query_as::<_, RecipeSummary>(
            "SELECT id, name, image, cooking_time FROM recipe WHERE author_id = ?1 ORDER BY created_at DESC, id DESC LIMIT ?2",
        )
        .bind(user.id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(|recipe| recipe.with_media(&self.media))
        .collect();

        let (recipes_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM recipe WHERE author_id = ?1")
                .bind(user.id)
                .fetch_one(&self.pool)
                .await?;

        Ok(Subscription {
            user,
            recipes,
            recipes_count,
        })
    }
}
