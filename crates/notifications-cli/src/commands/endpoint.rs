use anyhow::Result;
use notifications_client::{Identity, NotificationsClient};

use crate::output::endpoints_table;

pub async fn list(client: &NotificationsClient, identity: &Identity) -> Result<()> {
    let endpoints = client.list_endpoints(identity).await?;
    println!("{}", endpoints_table(&endpoints));
    Ok(())
}

pub async fn delete(client: &NotificationsClient, identity: &Identity, id: &str) -> Result<()> {
    let status = client.delete_endpoint(id, identity).await?;
    println!("Delete endpoint {}: HTTP {}", id, status.as_u16());
    Ok(())
}

pub async fn attach(
    client: &NotificationsClient,
    identity: &Identity,
    event_type_id: &str,
    endpoint_id: &str,
) -> Result<()> {
    let status = client
        .add_endpoint_to_event_type(event_type_id, endpoint_id, identity)
        .await?;
    println!(
        "Attach endpoint {endpoint_id} to event type {event_type_id}: HTTP {}",
        status.as_u16()
    );
    Ok(())
}
