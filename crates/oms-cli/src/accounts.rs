//! Sign-in and account creation.
//!
//! Both print the script's reply and exit non-zero when it reports failure.

use oms_core::{AuthResponse, NewUser};
use oms_sheets::SheetClient;

use crate::print_json;

pub(crate) async fn run_login(
    client: &SheetClient,
    username: &str,
    password: &str,
) -> anyhow::Result<()> {
    let reply = client.login(username, password).await?;
    finish("login", &reply)
}

pub(crate) async fn run_create_user(client: &SheetClient, user: &NewUser) -> anyhow::Result<()> {
    if user.username.trim().is_empty() || user.password.is_empty() {
        anyhow::bail!("username and password are required");
    }
    let reply = client.create_user(user).await?;
    finish("create-user", &reply)
}

fn finish(command: &str, reply: &AuthResponse) -> anyhow::Result<()> {
    print_json(reply)?;
    if reply.success {
        return Ok(());
    }
    anyhow::bail!(
        "{command} failed: {}",
        reply.error.as_deref().unwrap_or("no reason given")
    )
}
