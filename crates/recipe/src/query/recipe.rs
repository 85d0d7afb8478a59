use std::collections::{HashMap, HashSet};

use foodgram_db::table::{
    Favorite, Ingredient, Recipe, RecipeIngredient, RecipeTag, ShoppingCart, Tag, User,
};
use foodgram_shared::{Page, PageArgs};
use foodgram_user::UserView;
use sea_query::{Cond, Expr, ExprTrait, JoinType, Order, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use serde::Serialize;
use sqlx::prelude::FromRow;

use super::TagView;
use crate::collection::Collection;

#[derive(Debug, Clone, Default)]
pub struct RecipesQuery {
    pub author: Option<i64>,
    /// Tag slugs, a recipe matches when it carries any of them.
    pub tags: Vec<String>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub viewer: Option<i64>,
    pub args: PageArgs,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RecipeIngredientView {
    pub id: i64,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeView {
    pub id: i64,
    pub tags: Vec<TagView>,
    pub author: UserView,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
    pub name: String,
    pub image: String,
    pub text: String,
    pub cooking_time: i64,
}

#[derive(FromRow)]
struct RecipeRow {
    id: i64,
    author_id: i64,
    name: String,
    image: String,
    text: String,
    cooking_time: i64,
}

#[derive(FromRow)]
struct RecipeTagRow {
    recipe_id: i64,
    #[sqlx(flatten)]
    tag: TagView,
}

#[derive(FromRow)]
struct RecipeIngredientRow {
    recipe_id: i64,
    #[sqlx(flatten)]
    ingredient: RecipeIngredientView,
}

fn select_recipes() -> SelectStatement {
    sea_query::Query::select()
        .columns([
            (Recipe::Table, Recipe::Id),
            (Recipe::Table, Recipe::AuthorId),
            (Recipe::Table, Recipe::Name),
            (Recipe::Table, Recipe::Image),
            (Recipe::Table, Recipe::Text),
            (Recipe::Table, Recipe::CookingTime),
        ])
        .from(Recipe::Table)
        .to_owned()
}

impl super::Query {
    pub async fn find_recipe(
        &self,
        id: i64,
        viewer: Option<i64>,
    ) -> foodgram_shared::Result<Option<RecipeView>> {
        let statement = select_recipes()
            .and_where(Expr::col((Recipe::Table, Recipe::Id)).eq(id))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let Some(row) = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![row], viewer).await?.pop())
    }

    /// Newest recipes first.
    pub async fn filter_recipes(
        &self,
        query: RecipesQuery,
    ) -> foodgram_shared::Result<Page<RecipeView>> {
        let mut cond = Cond::all();

        if let Some(author) = query.author {
            self.ensure_author_exists(author).await?;
            cond = cond.add(Expr::col((Recipe::Table, Recipe::AuthorId)).eq(author));
        }

        if !query.tags.is_empty() {
            self.ensure_slugs_exist(&query.tags).await?;

            let tagged = sea_query::Query::select()
                .column((RecipeTag::Table, RecipeTag::RecipeId))
                .from(RecipeTag::Table)
                .join(
                    JoinType::InnerJoin,
                    Tag::Table,
                    Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
                )
                .and_where(Expr::col((Tag::Table, Tag::Slug)).is_in(query.tags.clone()))
                .to_owned();

            cond = cond.add(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(tagged));
        }

        if let Some(viewer) = query.viewer {
            if query.is_favorited {
                let favorites = sea_query::Query::select()
                    .column(Favorite::RecipeId)
                    .from(Favorite::Table)
                    .and_where(Expr::col(Favorite::UserId).eq(viewer))
                    .to_owned();

                cond = cond.add(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(favorites));
            }

            if query.is_in_shopping_cart {
                let cart = sea_query::Query::select()
                    .column(ShoppingCart::RecipeId)
                    .from(ShoppingCart::Table)
                    .and_where(Expr::col(ShoppingCart::UserId).eq(viewer))
                    .to_owned();

                cond = cond.add(Expr::col((Recipe::Table, Recipe::Id)).in_subquery(cart));
            }
        }

        let statement = sea_query::Query::select()
            .expr(Expr::cust("COUNT(*)"))
            .from(Recipe::Table)
            .cond_where(cond.clone())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;
        let count = count as u64;
        query.args.ensure_within(count)?;

        let statement = select_recipes()
            .cond_where(cond)
            .order_by_expr(Expr::col((Recipe::Table, Recipe::CreatedAt)), Order::Desc)
            .order_by_expr(Expr::col((Recipe::Table, Recipe::Id)), Order::Desc)
            .limit(query.args.limit)
            .offset(query.args.offset())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, RecipeRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(Page {
            args: query.args,
            count,
            results: self.hydrate(rows, query.viewer).await?,
        })
    }

    async fn ensure_author_exists(&self, author: i64) -> foodgram_shared::Result<()> {
        let statement = sea_query::Query::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(User::Id).eq(author))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let found = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        if found.is_none() {
            return Err(foodgram_shared::Error::field(
                "author",
                "Select a valid choice. That choice is not one of the available choices.",
            ));
        }

        Ok(())
    }

    /// Unknown slugs are rejected rather than silently matching nothing.
    async fn ensure_slugs_exist(&self, slugs: &[String]) -> foodgram_shared::Result<()> {
        let statement = sea_query::Query::select()
            .column(Tag::Slug)
            .from(Tag::Table)
            .and_where(Expr::col(Tag::Slug).is_in(slugs.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let found = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|(slug,)| slug)
            .collect::<HashSet<_>>();

        if let Some(missing) = slugs.iter().find(|slug| !found.contains(*slug)) {
            return Err(foodgram_shared::Error::field(
                "tags",
                format!("Select a valid choice. {missing} is not one of the available choices."),
            ));
        }

        Ok(())
    }

    /// Loads tags, ingredients, authors and the viewer's flags for a page of
    /// recipes, keeping the row order.
    async fn hydrate(
        &self,
        rows: Vec<RecipeRow>,
        viewer: Option<i64>,
    ) -> foodgram_shared::Result<Vec<RecipeView>> {
        if rows.is_empty() {
            return Ok(vec![]);
        }

        let ids = rows.iter().map(|r| r.id).collect::<Vec<_>>();

        let statement = sea_query::Query::select()
            .column((RecipeTag::Table, RecipeTag::RecipeId))
            .columns([
                (Tag::Table, Tag::Id),
                (Tag::Table, Tag::Name),
                (Tag::Table, Tag::Color),
                (Tag::Table, Tag::Slug),
            ])
            .from(RecipeTag::Table)
            .join(
                JoinType::InnerJoin,
                Tag::Table,
                Expr::col((Tag::Table, Tag::Id)).equals((RecipeTag::Table, RecipeTag::TagId)),
            )
            .and_where(Expr::col((RecipeTag::Table, RecipeTag::RecipeId)).is_in(ids.clone()))
            .order_by_expr(Expr::col((Tag::Table, Tag::Name)), Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut tags = HashMap::<i64, Vec<TagView>>::new();
        for row in sqlx::query_as_with::<_, RecipeTagRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
        {
            tags.entry(row.recipe_id).or_default().push(row.tag);
        }

        let statement = sea_query::Query::select()
            .column((RecipeIngredient::Table, RecipeIngredient::RecipeId))
            .columns([
                (Ingredient::Table, Ingredient::Id),
                (Ingredient::Table, Ingredient::Name),
                (Ingredient::Table, Ingredient::MeasurementUnit),
            ])
            .column((RecipeIngredient::Table, RecipeIngredient::Amount))
            .from(RecipeIngredient::Table)
            .join(
                JoinType::InnerJoin,
                Ingredient::Table,
                Expr::col((Ingredient::Table, Ingredient::Id))
                    .equals((RecipeIngredient::Table, RecipeIngredient::IngredientId)),
            )
            .and_where(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::RecipeId))
                    .is_in(ids.clone()),
            )
            .order_by_expr(
                Expr::col((RecipeIngredient::Table, RecipeIngredient::Id)),
                Order::Asc,
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let mut ingredients = HashMap::<i64, Vec<RecipeIngredientView>>::new();
        for row in sqlx::query_as_with::<_, RecipeIngredientRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
        {
            ingredients
                .entry(row.recipe_id)
                .or_default()
                .push(row.ingredient);
        }

        let mut author_ids = rows.iter().map(|r| r.author_id).collect::<Vec<_>>();
        author_ids.sort_unstable();
        author_ids.dedup();
        let authors = self
            .users
            .find_many(&author_ids, viewer)
            .await?
            .into_iter()
            .map(|user| (user.id, user))
            .collect::<HashMap<_, _>>();

        let (favorited, in_cart) = match viewer {
            Some(viewer) => (
                self.listed_by::<Favorite>(&ids, viewer).await?,
                self.listed_by::<ShoppingCart>(&ids, viewer).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        let mut views = Vec::with_capacity(rows.len());
        for row in rows {
            let Some(author) = authors.get(&row.author_id) else {
                foodgram_shared::server!("author {} of recipe {} not found", row.author_id, row.id);
            };

            views.push(RecipeView {
                id: row.id,
                tags: tags.remove(&row.id).unwrap_or_default(),
                author: author.clone(),
                ingredients: ingredients.remove(&row.id).unwrap_or_default(),
                is_favorited: favorited.contains(&row.id),
                is_in_shopping_cart: in_cart.contains(&row.id),
                name: row.name,
                image: self.media.resolve(&row.image),
                text: row.text,
                cooking_time: row.cooking_time,
            });
        }

        Ok(views)
    }

    /// Which of `ids` the user has in a favorites or cart list.
    async fn listed_by<T: Collection>(
        &self,
        ids: &[i64],
        user_id: i64,
    ) -> foodgram_shared::Result<HashSet<i64>> {
        let statement = sea_query::Query::select()
            .column(T::RECIPE_ID)
            .from(T::TABLE)
            .and_where(Expr::col(T::USER_ID).eq(user_id))
            .and_where(Expr::col(T::RECIPE_ID).is_in(ids.to_vec()))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(|(id,)| id)
            .collect())
    }
}
