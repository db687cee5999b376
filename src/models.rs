pub mod auth;
pub mod owner;
pub mod product;
pub mod sales;
pub mod store;
