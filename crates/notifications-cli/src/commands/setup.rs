use std::slice;

use anyhow::Result;
use colored::Colorize;
use notifications_client::{Identity, NotificationsClient};
use serde_json::{Map, Value, json};

use crate::cli::{EndpointKind, SetupArgs};
use crate::output::print_success;

/// Endpoint properties for the requested kind. Camel endpoints need a sub type.
pub fn endpoint_properties(args: &SetupArgs) -> Result<Map<String, Value>> {
    let mut properties = Map::new();
    properties.insert("url".into(), json!(args.url));
    properties.insert("disable_ssl_verification".into(), json!(false));
    match args.endpoint_type {
        EndpointKind::Webhook => {
            properties.insert("method".into(), json!("POST"));
        }
        EndpointKind::Camel => {
            let Some(sub_type) = &args.sub_type else {
                anyhow::bail!("--sub-type is required for camel endpoints");
            };
            properties.insert("sub_type".into(), json!(sub_type));
        }
    }
    if let Some(secret) = &args.secret_token {
        properties.insert("secret_token".into(), json!(secret));
    }
    Ok(properties)
}

pub async fn setup(
    client: &NotificationsClient,
    identity: &Identity,
    args: &SetupArgs,
) -> Result<()> {
    let properties = endpoint_properties(args)?;

    let bundle_id = client
        .add_bundle(&args.bundle, &args.bundle_display_name)
        .await?;
    print_success(&format!("Bundle {} = {}", args.bundle.cyan(), bundle_id));

    let app_id = client
        .add_application(&bundle_id, &args.application, &args.application_display_name)
        .await?;
    print_success(&format!("Application {} = {}", args.application.cyan(), app_id));

    let event_type_id = client
        .add_event_type(&app_id, &args.event_type, &args.event_type_display_name)
        .await?;
    print_success(&format!("Event type {} = {}", args.event_type.cyan(), event_type_id));

    let endpoint_id = client
        .create_endpoint(&args.endpoint, identity, properties, args.endpoint_type.into())
        .await?;
    print_success(&format!("Endpoint {} = {}", args.endpoint.cyan(), endpoint_id));

    let group_id = client
        .add_behavior_group(&bundle_id, &args.behavior_group, identity)
        .await?;
    print_success(&format!(
        "Behavior group {} = {}",
        args.behavior_group.cyan(),
        group_id
    ));

    let status = client
        .link_behavior_group_endpoints(&group_id, slice::from_ref(&endpoint_id), identity)
        .await?;
    println!("Linked endpoint to behavior group: HTTP {}", status.as_u16());

    let status = client
        .link_event_type_behavior_groups(&event_type_id, slice::from_ref(&group_id), identity)
        .await?;
    println!("Linked behavior group to event type: HTTP {}", status.as_u16());

    Ok(())
}
