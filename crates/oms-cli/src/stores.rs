//! Store command handlers.

use oms_core::NewStore;
use oms_sheets::SheetClient;

use crate::print_json;

pub(crate) async fn run_stores_list(client: &SheetClient) -> anyhow::Result<()> {
    let stores = client.get_stores().await?;
    tracing::info!(count = stores.len(), "stores loaded");
    print_json(&stores)
}

/// Adds a store with zeroed counters and prints the created row.
///
/// # Errors
///
/// Returns an error if the name is blank or the script call fails.
pub(crate) async fn run_store_add(
    client: &SheetClient,
    name: &str,
    url: &str,
    region: &str,
) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        anyhow::bail!("store name must not be empty");
    }

    let store = client
        .add_store(NewStore {
            name: name.trim().to_owned(),
            url: url.trim().to_owned(),
            region: region.trim().to_owned(),
        })
        .await?;
    print_json(&store)
}

pub(crate) async fn run_store_delete(client: &SheetClient, id: &str) -> anyhow::Result<()> {
    client.delete_store(id).await?;
    print_json(&serde_json::json!({ "success": true, "id": id }))
}
