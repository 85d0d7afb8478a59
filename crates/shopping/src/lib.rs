mod query;
mod render;

pub use query::*;
pub use render::*;
