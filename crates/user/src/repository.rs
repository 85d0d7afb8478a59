use foodgram_db::table::{User, UserLogin};
use sea_query::{Expr, ExprTrait, JoinType, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use time::OffsetDateTime;

use foodgram_shared::user::Role;

#[derive(FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub role: sqlx::types::Text<Role>,
}

pub enum FindType {
    Id(i64),
    Email(String),
    Username(String),
}

pub(crate) async fn find(
    pool: &SqlitePool,
    arg_type: FindType,
) -> foodgram_shared::Result<Option<UserRow>> {
    let mut statement = Query::select()
        .columns([
            User::Id,
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::Role,
        ])
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

    Ok(sqlx::query_as_with::<_, UserRow, _>(&sql, values)
        .fetch_optional(pool)
        .await?)
}

pub(crate) async fn exists(pool: &SqlitePool, arg_type: FindType) -> foodgram_shared::Result<bool> {
    let mut statement = Query::select()
        .column(User::Id)
        .from(User::Table)
        .limit(1)
        .to_owned();

    match arg_type {
        FindType::Id(id) => statement.and_where(Expr::col(User::Id).eq(id)),
        FindType::Email(email) => statement.and_where(Expr::col(User::Email).eq(email)),
        FindType::Username(username) => {
            statement.and_where(Expr::col(User::Username).eq(username))
        }
    };

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.is_some())
}

pub struct CreateInput {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub(crate) async fn create(
    pool: &SqlitePool,
    input: CreateInput,
) -> foodgram_shared::Result<i64> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(User::Table)
        .columns([
            User::Email,
            User::Username,
            User::FirstName,
            User::LastName,
            User::Password,
            User::Role,
            User::CreatedAt,
        ])
        .values_panic([
            input.email.into(),
            input.username.into(),
            input.first_name.into(),
            input.last_name.into(),
            input.password.into(),
            Role::User.to_string().into(),
            now.into(),
        ])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let result = sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(result.last_insert_rowid())
}

pub struct UpdateInput {
    pub id: i64,
    pub password: Option<String>,
    pub role: Option<Role>,
}

pub(crate) async fn update(pool: &SqlitePool, input: UpdateInput) -> foodgram_shared::Result<()> {
    let mut statement = Query::update()
        .table(User::Table)
        .and_where(Expr::col(User::Id).eq(input.id))
        .to_owned();

    if let Some(password) = input.password {
        statement.value(User::Password, password);
    }

    if let Some(role) = input.role {
        statement.value(User::Role, role.as_ref());
    }

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn create_login(
    pool: &SqlitePool,
    access_id: &str,
    user_id: i64,
) -> foodgram_shared::Result<()> {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let statement = Query::insert()
        .into_table(UserLogin::Table)
        .columns([UserLogin::Id, UserLogin::UserId, UserLogin::CreatedAt])
        .values_panic([access_id.into(), user_id.into(), now.into()])
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

pub(crate) async fn delete_login(pool: &SqlitePool, access_id: &str) -> foodgram_shared::Result<()> {
    let statement = Query::delete()
        .from_table(UserLogin::Table)
        .and_where(Expr::col(UserLogin::Id).eq(access_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    sqlx::query_with(&sql, values).execute(pool).await?;

    Ok(())
}

/// Role of the user owning a live access id, `None` once logged out.
pub(crate) async fn find_login_role(
    pool: &SqlitePool,
    access_id: &str,
    user_id: i64,
) -> foodgram_shared::Result<Option<Role>> {
    let statement = Query::select()
        .column((User::Table, User::Role))
        .from(UserLogin::Table)
        .join(
            JoinType::InnerJoin,
            User::Table,
            Expr::col((User::Table, User::Id)).equals((UserLogin::Table, UserLogin::UserId)),
        )
        .and_where(Expr::col((UserLogin::Table, UserLogin::Id)).eq(access_id))
        .and_where(Expr::col((User::Table, User::Id)).eq(user_id))
        .limit(1)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row = sqlx::query_as_with::<_, (sqlx::types::Text<Role>,), _>(&sql, values)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(role,)| role.0))
}
