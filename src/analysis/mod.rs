pub mod extract;
pub mod tree;
pub mod types;
