pub mod app_config;
pub mod config;
pub mod dashboard;
pub mod orders;
pub mod stores;
pub mod users;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::{DailyRevenue, DashboardMetrics};
pub use orders::{NewOrder, Order, OrderStatus};
pub use stores::{NewStore, Store, DEFAULT_STORE_STATUS};
pub use users::{AuthResponse, NewUser, User};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
