mod collection;
mod ingredient;
mod query;
mod root;
mod tag;

pub use ingredient::NewIngredient;
pub use query::*;
pub use root::*;
pub use tag::TagInput;
