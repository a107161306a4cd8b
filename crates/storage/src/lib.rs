pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod seed;
pub mod store;

pub use store::Database;
