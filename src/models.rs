pub mod types;
pub mod username;
