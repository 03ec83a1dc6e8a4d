use colored::Colorize;
use notifications_client::{Endpoint, EndpointType, EventLogAction, EventLogEntry, HistoryEntry};
use serde_json::{Map, Value};
use tabled::builder::Builder;
use tabled::settings::Style;

pub fn print_success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Shortens a dotted name to the initials of all but its last segment:
/// `com.redhat.console.slack` becomes `c.r.c.slack`.
pub fn shorten_path(path: &str) -> String {
    let segments: Vec<&str> = path.split('.').collect();
    let Some((last, init)) = segments.split_last() else {
        return String::new();
    };
    let mut out = String::new();
    for segment in init {
        if let Some(first) = segment.chars().next() {
            out.push(first);
        }
        out.push('.');
    }
    out.push_str(last);
    out
}

fn type_label(endpoint_type: EndpointType, sub_type: Option<&str>) -> String {
    match sub_type {
        Some(sub) => format!("{endpoint_type}({sub})"),
        None => endpoint_type.to_string(),
    }
}

pub fn endpoints_table(endpoints: &[Endpoint]) -> String {
    if endpoints.is_empty() {
        return "No endpoints found.".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(["ID", "Name", "Type", "Enabled", "URL"]);
    for ep in endpoints {
        builder.push_record([
            ep.id.clone(),
            ep.name.clone(),
            type_label(ep.endpoint_type, ep.resolved_sub_type()),
            ep.enabled.to_string(),
            ep.url().unwrap_or("-").to_string(),
        ]);
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Header line for an endpoint in the per-endpoint history listing.
pub fn endpoint_line(ep: &Endpoint) -> String {
    format!(
        "Endpoint  >{}< of type {}, url={}, created at {}, id= {}",
        ep.name,
        type_label(ep.endpoint_type, ep.resolved_sub_type()),
        ep.url().unwrap_or("-"),
        ep.created.as_deref().unwrap_or("-"),
        ep.id
    )
}

fn details_text(details: Option<&Map<String, Value>>) -> String {
    match details {
        Some(map) => Value::Object(map.clone()).to_string(),
        None => "none".to_string(),
    }
}

const NO_DETAILS: &str = "No details provided";

/// Camel and email deliveries may succeed without reporting details.
fn details_are_optional(endpoint_type: Option<EndpointType>) -> bool {
    matches!(
        endpoint_type,
        Some(EndpointType::Camel | EndpointType::EmailSubscription)
    )
}

pub fn history_entry_lines(entry: &HistoryEntry) -> Vec<String> {
    let details = match entry.details.as_ref() {
        None if details_are_optional(entry.endpoint_type) => NO_DETAILS.to_string(),
        details => details_text(details),
    };
    vec![
        format!(
            "   {}, successful: {}, duration= {}",
            entry.created, entry.invocation_result, entry.invocation_time
        ),
        format!("     Details: {details}"),
    ]
}

pub fn action_lines(action: &EventLogAction) -> Vec<String> {
    let mut lines = vec![format!(
        "  Type  {}, success= {}",
        action.endpoint_type, action.invocation_result
    )];
    if action.endpoint_type != EndpointType::Camel {
        return lines;
    }
    match action.camel_details() {
        None => lines.push(format!("    {NO_DETAILS}")),
        Some(details) => {
            lines.push(format!(
                "    sub_type   {}",
                details.kind.map(shorten_path).unwrap_or_else(|| "-".into())
            ));
            lines.push(format!("    target url {}", details.target.unwrap_or("-")));
            lines.push(format!("    outcome    {}", details.outcome.unwrap_or("-")));
        }
    }
    lines
}

pub fn event_log_lines(entries: &[EventLogEntry]) -> Vec<String> {
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!("Entry created at {}", entry.created));
        for action in &entry.actions {
            lines.extend(action_lines(action));
        }
    }
    lines
}

pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}
