pub mod auth;
pub mod owner_service;
pub mod ownership;
pub mod product_service;
pub mod sales_service;
pub mod store_service;
