mod account;
mod error;
mod transaction;

pub use account::*;
pub use error::*;
pub use transaction::*;

/// Collision-resistant identity for entities created without an explicit id.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
