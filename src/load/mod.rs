mod db;
mod store;

pub use db::Db;
pub use store::{DatasetStore, IdentityKind, IdentityStore};

#[cfg(test)]
pub use store::testing;
