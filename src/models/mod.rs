//! Data models module
//!
//! Domain entities shared across repositories, services, and handlers

pub mod ban;
pub mod catalog;
pub mod deposit;
pub mod order;
pub mod user;

pub use ban::{BannedUser, FailedAttemptOutcome};
pub use catalog::{
    Banner, Category, InputField, PaymentMethod, Product, StoreProfile, UpdateStoreProfileRequest,
    UpsertBannerRequest, UpsertCategoryRequest, UpsertInputFieldRequest,
    UpsertPaymentMethodRequest, UpsertProductRequest,
};
pub use deposit::{CreateDepositRequest, Deposit, DepositStatus};
pub use order::{CreateOrderRequest, Order, OrderStatus};
pub use user::{UpsertUserRequest, User};
