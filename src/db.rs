pub mod store_repo;
pub use store_repo::StoreRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod order_repo;
pub use order_repo::OrderRepository;
pub mod stats_repo;
pub use stats_repo::{StatsRepository, StatsWindows};
