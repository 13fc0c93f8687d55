//! Services module
//!
//! This module contains business logic services

pub mod auth;
pub mod balance;
pub mod ban;
pub mod catalog;
pub mod deposit;
pub mod notification;
pub mod order;
pub mod user;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService, InitData, WebAppUser};
pub use balance::{BalanceOp, BalanceService};
pub use ban::BanService;
pub use catalog::CatalogService;
pub use deposit::DepositService;
pub use notification::{BroadcastOutcome, NotificationService};
pub use order::OrderService;
pub use user::UserService;

use crate::config::Settings;
use crate::database::DatabaseService;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth_service: AuthService,
    pub balance_service: BalanceService,
    pub ban_service: BanService,
    pub catalog_service: CatalogService,
    pub deposit_service: DepositService,
    pub notification_service: NotificationService,
    pub order_service: OrderService,
    pub user_service: UserService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings, database: DatabaseService) -> Result<Self> {
        let notification_service = NotificationService::new(settings.clone())?;
        let auth_service = AuthService::new(settings.clone());
        let balance_service = BalanceService::new(database.users.clone());
        let user_service = UserService::new(database.users.clone());
        let catalog_service = CatalogService::new(database.catalog.clone(), settings.clone());
        let ban_service = BanService::new(
            database.bans.clone(),
            database.users.clone(),
            notification_service.clone(),
            settings.clone(),
        );
        let order_service = OrderService::new(
            database.orders.clone(),
            database.catalog.clone(),
            ban_service.clone(),
            notification_service.clone(),
            settings.clone(),
        );
        let deposit_service = DepositService::new(
            database.deposits.clone(),
            database.catalog.clone(),
            notification_service.clone(),
            settings,
        );

        Ok(Self {
            auth_service,
            balance_service,
            ban_service,
            catalog_service,
            deposit_service,
            notification_service,
            order_service,
            user_service,
        })
    }
}
