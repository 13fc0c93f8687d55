//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod ban;
pub mod catalog;
pub mod deposit;
pub mod order;
pub mod user;

// Re-export repositories
pub use ban::BanRepository;
pub use catalog::CatalogRepository;
pub use deposit::{DepositRepository, NewDeposit, ProcessedDeposit};
pub use order::{NewOrder, OrderRepository, ProcessedOrder};
pub use user::UserRepository;
