pub mod filter;
pub mod story;
