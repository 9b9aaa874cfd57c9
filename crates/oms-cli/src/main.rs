mod accounts;
mod orders;
mod stores;
mod watch;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use crate::orders::StatusArg;

#[derive(Debug, Parser)]
#[command(name = "oms-cli")]
#[command(about = "Order and store dashboard backed by a spreadsheet script")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every store, with drifted rows repaired
    Stores,
    /// List every order
    Orders,
    /// Print the dashboard figures and daily revenue
    Stats,
    /// Register a new store
    AddStore {
        #[arg(long)]
        name: String,
        #[arg(long)]
        url: String,
        /// Region code (e.g., VN, US)
        #[arg(long, default_value = "")]
        region: String,
    },
    /// Delete a store by id
    DeleteStore {
        /// Store id (e.g., ST-482913)
        id: String,
    },
    /// Record a new order
    AddOrder {
        #[arg(long)]
        customer: String,
        #[arg(long)]
        product: String,
        #[arg(long, default_value = "1")]
        quantity: u32,
        /// Order total in VND
        #[arg(long)]
        total: rust_decimal::Decimal,
        #[arg(long, value_enum, default_value = "pending")]
        status: StatusArg,
        /// Order day as YYYY-MM-DD; defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Sign in to the dashboard
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "OMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create a dashboard account
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long, env = "OMS_NEW_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: String,
        /// admin, leader, support, designer, idea, or a custom role
        #[arg(long)]
        role: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Re-fetch stores and stats on the refresh interval until Ctrl-C
    Watch {
        /// Override `OMS_REFRESH_INTERVAL_SECS`
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = oms_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, "configuration loaded");

    let client = oms_sheets::SheetClient::from_app_config(&config)?;

    match cli.command {
        Commands::Stores => stores::run_stores_list(&client).await,
        Commands::Orders => orders::run_orders_list(&client).await,
        Commands::Stats => orders::run_stats(&client).await,
        Commands::AddStore { name, url, region } => {
            stores::run_store_add(&client, &name, &url, &region).await
        }
        Commands::DeleteStore { id } => stores::run_store_delete(&client, &id).await,
        Commands::AddOrder {
            customer,
            product,
            quantity,
            total,
            status,
            date,
        } => {
            let order = oms_core::NewOrder {
                customer_name: customer,
                product_name: product,
                quantity,
                total_amount: total,
                status: status.into(),
                date: date.unwrap_or_else(orders::today),
            };
            orders::run_order_add(&client, order).await
        }
        Commands::Login { username, password } => {
            accounts::run_login(&client, &username, &password).await
        }
        Commands::CreateUser {
            username,
            password,
            full_name,
            role,
            email,
            phone,
        } => {
            let user = oms_core::NewUser {
                username,
                password,
                full_name,
                role,
                email,
                phone,
            };
            accounts::run_create_user(&client, &user).await
        }
        Commands::Watch { interval_secs } => {
            let secs = interval_secs.unwrap_or(config.refresh_interval_secs);
            watch::run_watch(&client, secs).await
        }
    }
}

/// Writes `value` to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
