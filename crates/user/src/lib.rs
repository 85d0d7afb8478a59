pub mod jwt;

mod query;
pub(crate) mod repository;
mod root;
mod subscription;

pub use query::*;
pub use root::*;
