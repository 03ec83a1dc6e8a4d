//! Typed routes for every collection and resource the client touches.
//!
//! All URLs are assembled segment by segment on top of one validated root,
//! so identifiers are always percent-encoded and the parent/child schema
//! lives in a single `match`.

use url::Url;

use crate::config::ClientConfig;
use crate::error::ClientError;

const INTERNAL: &[&str] = &["internal"];
const INTEGRATIONS: &[&str] = &["api", "integrations", "v1.0"];
const NOTIFICATIONS: &[&str] = &["api", "notifications", "v1.0", "notifications"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Bundles,
    Bundle(&'a str),
    BundleApplications(&'a str),
    Applications,
    Application(&'a str),
    ApplicationEventTypes(&'a str),
    EventTypes,
    Endpoints,
    Endpoint(&'a str),
    EndpointHistory(&'a str),
    BehaviorGroups,
    BundleBehaviorGroups(&'a str),
    BehaviorGroupActions(&'a str),
    EventTypeEndpoints(&'a str),
    EventTypeEndpoint(&'a str, &'a str),
    EventTypeBehaviorGroups(&'a str),
    Events,
}

impl<'a> Route<'a> {
    pub fn segments(&self) -> Vec<&'a str> {
        let (prefix, rest): (&[&'a str], Vec<&'a str>) = match *self {
            Route::Bundles => (INTERNAL, vec!["bundles"]),
            Route::Bundle(id) => (INTERNAL, vec!["bundles", id]),
            Route::BundleApplications(id) => (INTERNAL, vec!["bundles", id, "applications"]),
            Route::Applications => (INTERNAL, vec!["applications"]),
            Route::Application(id) => (INTERNAL, vec!["applications", id]),
            Route::ApplicationEventTypes(id) => (INTERNAL, vec!["applications", id, "eventTypes"]),
            Route::EventTypes => (INTERNAL, vec!["eventTypes"]),
            Route::Endpoints => (INTEGRATIONS, vec!["endpoints"]),
            Route::Endpoint(id) => (INTEGRATIONS, vec!["endpoints", id]),
            Route::EndpointHistory(id) => (INTEGRATIONS, vec!["endpoints", id, "history"]),
            Route::BehaviorGroups => (NOTIFICATIONS, vec!["behaviorGroups"]),
            Route::BundleBehaviorGroups(id) => {
                (NOTIFICATIONS, vec!["bundles", id, "behaviorGroups"])
            }
            Route::BehaviorGroupActions(id) => {
                (NOTIFICATIONS, vec!["behaviorGroups", id, "actions"])
            }
            Route::EventTypeEndpoints(id) => (NOTIFICATIONS, vec!["eventTypes", id]),
            Route::EventTypeEndpoint(et, ep) => (NOTIFICATIONS, vec!["eventTypes", et, ep]),
            Route::EventTypeBehaviorGroups(id) => {
                (NOTIFICATIONS, vec!["eventTypes", id, "behaviorGroups"])
            }
            Route::Events => (NOTIFICATIONS, vec!["events"]),
        };
        prefix.iter().copied().chain(rest).collect()
    }
}

/// Resolves [`Route`]s against the configured base URL and proxy prefix.
#[derive(Debug, Clone)]
pub struct ApiPaths {
    root: Url,
}

impl ApiPaths {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let mut root = Url::parse(config.base_url.trim())?;
        if root.cannot_be_a_base() {
            return Err(ClientError::BaseUrlNotHierarchical(config.base_url.clone()));
        }
        if let Some(prefix) = config.proxy_prefix.as_deref()
            && let Ok(mut segments) = root.path_segments_mut()
        {
            segments
                .pop_if_empty()
                .extend(prefix.split('/').filter(|s| !s.is_empty()));
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn url(&self, route: Route<'_>) -> Url {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .expect("root is checked to be a base URL")
            .pop_if_empty()
            .extend(route.segments());
        url
    }
}
