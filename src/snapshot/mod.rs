pub mod identity;
pub mod store;

pub use identity::Identity;
pub use store::{exists, SnapshotStore};
