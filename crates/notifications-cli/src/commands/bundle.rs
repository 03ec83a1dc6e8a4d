use anyhow::Result;
use colored::Colorize;
use notifications_client::NotificationsClient;

use super::require;
use crate::error::Fatal;
use crate::output::print_success;

/// Deletes a bundle and checks that its name no longer resolves.
pub async fn delete_bundle(client: &NotificationsClient, name: &str) -> Result<()> {
    let id = require(client.find_bundle(name).await, "Bundle", name)?;
    let status = client.delete_bundle(&id).await?;
    println!("Delete bundle {}: HTTP {}", id, status.as_u16());

    if client.find_bundle(name).await.is_found() {
        return Err(Fatal::new(
            1,
            format!("Bundle \"{name}\" still present after delete (HTTP {status})"),
        )
        .into());
    }
    print_success(&format!("Deleted bundle {}", name.cyan()));
    Ok(())
}

pub async fn delete_application(
    client: &NotificationsClient,
    bundle: &str,
    name: &str,
) -> Result<()> {
    let bundle_id = require(client.find_bundle(bundle).await, "Bundle", bundle)?;
    let id = require(
        client.find_application(&bundle_id, name).await,
        "Application",
        name,
    )?;
    let status = client.delete_application(&id).await?;
    println!("Delete application {}: HTTP {}", id, status.as_u16());
    Ok(())
}
