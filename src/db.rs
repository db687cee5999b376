pub mod owner_repo;
pub use owner_repo::OwnerRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
