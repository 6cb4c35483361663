pub mod store;
pub mod client;
pub mod product;
pub mod order;
pub mod stats;
