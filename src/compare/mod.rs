pub mod differ;

pub use differ::{compare, Comparison};
