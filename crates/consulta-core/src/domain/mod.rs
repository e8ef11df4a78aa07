//! Catalog domain types.

mod product;
mod source;

pub use product::Product;
pub use source::DataSource;
