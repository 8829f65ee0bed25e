mod repository;
mod store;

pub use repository::*;
pub use store::*;
