use anyhow::{Context, Result};
use notifications_client::{
    ClientError, EventLogEntry, HistoryFilter, Identity, NotificationsClient,
};

use super::require;
use crate::cli::{EndpointHistoryArgs, HistoryArgs};
use crate::error::Fatal;
use crate::output::{endpoint_line, event_log_lines, history_entry_lines, print_lines};

/// Event log of one event type, looked up by display name.
pub async fn history(
    client: &NotificationsClient,
    identity: &Identity,
    args: &HistoryArgs,
) -> Result<()> {
    let bundle_id = require(client.find_bundle(&args.bundle).await, "Bundle", &args.bundle)?;
    let app_id = require(
        client.find_application(&bundle_id, &args.application).await,
        "Application",
        &args.application,
    )?;

    let filter = HistoryFilter {
        bundle_id: Some(bundle_id),
        application_id: Some(app_id),
        event_type_display_name: Some(args.event_type.clone()),
    };
    let entries = client
        .fetch_history(&filter, identity)
        .await
        .context("Reading the event log failed")?;

    ensure_events(&entries, &args.event_type)?;
    print_lines(&event_log_lines(&entries));
    Ok(())
}

/// Recent deliveries of every endpoint linked to an event type, by id.
pub async fn endpoint_history(
    client: &NotificationsClient,
    identity: &Identity,
    args: &EndpointHistoryArgs,
) -> Result<()> {
    let endpoints = client
        .event_type_endpoints(&args.event_type_id, identity)
        .await
        .with_context(|| format!("Reading endpoints of event type {}", args.event_type_id))?;

    for ep in &endpoints {
        println!("{}", endpoint_line(ep));
        let entries = client
            .endpoint_history(&ep.id, args.limit, identity)
            .await
            .map_err(pass_through_status)?;
        for entry in &entries {
            print_lines(&history_entry_lines(entry));
        }
    }
    Ok(())
}

/// The display-name filter matching nothing means the event type is unknown.
fn ensure_events(entries: &[EventLogEntry], event_type: &str) -> Result<(), Fatal> {
    if entries.is_empty() {
        return Err(Fatal::new(1, format!("Event type \"{event_type}\" not found")));
    }
    Ok(())
}

/// A failed history read ends the run with the remote status as exit code.
fn pass_through_status(err: ClientError) -> anyhow::Error {
    match err.status() {
        Some(status) => {
            Fatal::new(i32::from(status), format!("Reading history failed: {err}")).into()
        }
        None => anyhow::Error::from(err).context("Reading history failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::exit_code;

    #[test]
    fn history_read_failure_exits_with_remote_status() {
        let err = pass_through_status(ClientError::Read {
            resource: "endpoint history",
            status: 403,
            reason: "Forbidden".into(),
        });
        assert_eq!(exit_code(&err), 403);
        assert!(err.to_string().contains("HTTP 403"));
    }

    #[test]
    fn unknown_event_type_exits_non_zero() {
        let err = anyhow::Error::from(ensure_events(&[], "policy-triggered").unwrap_err());
        assert_eq!(exit_code(&err), 1);
        assert_eq!(err.to_string(), "Event type \"policy-triggered\" not found");
    }

    #[test]
    fn event_type_with_events_passes() {
        let entries: Vec<EventLogEntry> = serde_json::from_value(serde_json::json!([
            { "created": "2022-03-01T10:00:00", "actions": [] }
        ]))
        .unwrap();
        assert!(ensure_events(&entries, "policy-triggered").is_ok());
    }
}
