pub mod client_service;
pub mod image_service;
pub mod order_service;
pub mod product_service;
pub mod stats_service;
pub mod store_service;
