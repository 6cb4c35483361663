// src/handlers.rs

pub mod clients;
pub mod health;
pub mod orders;
pub mod products;
pub mod stats;
pub mod stores;
