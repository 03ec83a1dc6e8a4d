use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property key under which a client-generated correlation id is sent with
/// every new endpoint.
pub const ENDPOINT_CORRELATION_KEY: &str = "endpointId";

/// A resource addressable by a natural key within its parent scope.
pub trait Keyed {
    fn id(&self) -> &str;
    fn natural_key(&self) -> &str;
}

/// Top-level grouping of applications
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bundle_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Named set of endpoints triggered for a set of event types.
///
/// Behavior groups are keyed by display name; they have no `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorGroup {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub bundle_id: Option<String>,
}

macro_rules! keyed {
    ($ty:ty, $key:ident) => {
        impl Keyed for $ty {
            fn id(&self) -> &str {
                &self.id
            }

            fn natural_key(&self) -> &str {
                &self.$key
            }
        }
    };
}

keyed!(Bundle, name);
keyed!(Application, name);
keyed!(EventType, name);
keyed!(BehaviorGroup, display_name);

/// Delivery target kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    #[default]
    Webhook,
    Camel,
    Ansible,
    EmailSubscription,
    Drawer,
    #[serde(other)]
    Unknown,
}

impl EndpointType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webhook => "webhook",
            Self::Camel => "camel",
            Self::Ansible => "ansible",
            Self::EmailSubscription => "email_subscription",
            Self::Drawer => "drawer",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Endpoint {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub created: Option<String>,
}

impl Endpoint {
    /// Sub type from the top level, or from the properties for older
    /// camel endpoints.
    pub fn resolved_sub_type(&self) -> Option<&str> {
        self.sub_type
            .as_deref()
            .or_else(|| self.property_str("sub_type"))
    }

    pub fn url(&self) -> Option<&str> {
        self.property_str("url")
    }

    fn property_str(&self, key: &str) -> Option<&str> {
        self.properties.as_ref()?.get(key)?.as_str()
    }
}

/// One delivery attempt as reported by an endpoint's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub created: String,
    pub invocation_result: bool,
    /// Duration of the invocation in milliseconds
    #[serde(default)]
    pub invocation_time: i64,
    #[serde(default)]
    pub endpoint_type: Option<EndpointType>,
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
}

/// One event in the event log, with its delivery actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub created: String,
    #[serde(default)]
    pub bundle: Option<String>,
    #[serde(default)]
    pub application: Option<String>,
    #[serde(default)]
    pub event_type: Option<String>,
    #[serde(default)]
    pub actions: Vec<EventLogAction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogAction {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub endpoint_id: Option<String>,
    pub endpoint_type: EndpointType,
    #[serde(default)]
    pub endpoint_sub_type: Option<String>,
    #[serde(default)]
    pub invocation_result: bool,
    #[serde(default)]
    pub status: Option<String>,
    /// Absent for successful deliveries that reported nothing.
    #[serde(default)]
    pub details: Option<Map<String, Value>>,
}

impl EventLogAction {
    pub fn camel_details(&self) -> Option<CamelDetails<'_>> {
        if self.endpoint_type != EndpointType::Camel {
            return None;
        }
        let details = self.details.as_ref()?;
        let field = |key: &str| details.get(key).and_then(Value::as_str);
        Some(CamelDetails {
            kind: field("type"),
            target: field("target"),
            outcome: field("outcome"),
        })
    }
}

/// The fields a camel delivery reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CamelDetails<'a> {
    pub kind: Option<&'a str>,
    pub target: Option<&'a str>,
    pub outcome: Option<&'a str>,
}

/// Filters for the event log query. Only the first page is ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub bundle_id: Option<String>,
    pub application_id: Option<String>,
    pub event_type_display_name: Option<String>,
}

impl HistoryFilter {
    pub(crate) fn query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = &self.bundle_id {
            query.push(("bundleIds", id.clone()));
        }
        if let Some(id) = &self.application_id {
            query.push(("appIds", id.clone()));
        }
        if let Some(name) = &self.event_type_display_name {
            query.push(("eventTypeDisplayName", name.clone()));
        }
        query.push(("includeDetails", "true".to_string()));
        query.push(("includeActions", "true".to_string()));
        query
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    pub data: Vec<T>,
}

/// List responses come either bare or wrapped in a page.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum Listing<T> {
    Paged(Page<T>),
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Paged(page) => page.data,
            Self::Bare(items) => items,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Created {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewBundle<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewApplication<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub bundle_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewEventType<'a> {
    pub name: &'a str,
    pub display_name: &'a str,
    pub application_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewBehaviorGroup<'a> {
    pub display_name: &'a str,
    pub bundle_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct NewEndpoint<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub enabled: bool,
    pub properties: Map<String, Value>,
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
}
