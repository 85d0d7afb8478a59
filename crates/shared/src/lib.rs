mod error;
mod media;
mod page;
pub mod recipe;
pub mod user;

pub use error::*;
pub use media::*;
pub use page::*;

/// Connection pools shared by every command. SQLite allows a single writer,
/// so writes go through a one-connection pool.
#[derive(Clone)]
pub struct State {
    pub read_db: sqlx::SqlitePool,
    pub write_db: sqlx::SqlitePool,
}

impl State {
    pub fn single(pool: sqlx::SqlitePool) -> Self {
        Self {
            read_db: pool.clone(),
            write_db: pool,
        }
    }
}
