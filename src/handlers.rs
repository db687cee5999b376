pub mod auth;
pub mod owners;
pub mod products;
pub mod sales;
pub mod stores;
