use std::sync::LazyLock;

use foodgram_db::table::Tag;
use regex::Regex;
use sea_query::{Cond, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use validator::Validate;

static RE_COLOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());
static RE_SLUG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").unwrap());

#[derive(Validate)]
pub struct TagInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(regex(path = *RE_COLOR, message = "Color must be a hex code like #E26C2D."))]
    pub color: String,
    #[validate(
        length(min = 1, max = 200),
        regex(
            path = *RE_SLUG,
            message = "Enter a valid slug consisting of letters, numbers, underscores or hyphens."
        )
    )]
    pub slug: String,
}

impl crate::Command {
    pub async fn create_tag(&self, input: TagInput) -> foodgram_shared::Result<i64> {
        input.validate()?;

        let color = input.color.to_uppercase();

        let statement = Query::select()
            .columns([Tag::Name, Tag::Color, Tag::Slug])
            .from(Tag::Table)
            .cond_where(
                Cond::any()
                    .add(Expr::col(Tag::Name).eq(input.name.to_owned()))
                    .add(Expr::col(Tag::Color).eq(color.to_owned()))
                    .add(Expr::col(Tag::Slug).eq(input.slug.to_owned())),
            )
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let taken = sqlx::query_as_with::<_, (String, String, String), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?;

        for (name, taken_color, slug) in taken {
            if name == input.name {
                return Err(foodgram_shared::Error::field(
                    "name",
                    "Tag with this name already exists.",
                ));
            }

            if taken_color == color {
                return Err(foodgram_shared::Error::field(
                    "color",
                    "Tag with this color already exists.",
                ));
            }

            if slug == input.slug {
                return Err(foodgram_shared::Error::field(
                    "slug",
                    "Tag with this slug already exists.",
                ));
            }
        }

        let statement = Query::insert()
            .into_table(Tag::Table)
            .columns([Tag::Name, Tag::Color, Tag::Slug])
            .values_panic([
                input.name.to_owned().into(),
                color.into(),
                input.slug.to_owned().into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let id = sqlx::query_with(&sql, values)
            .execute(&self.write_db)
            .await?
            .last_insert_rowid();

        tracing::info!(tag_id = id, slug = %input.slug, "tag created");

        Ok(id)
    }
}
