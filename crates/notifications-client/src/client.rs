use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{ClientError, CreationError, ResourceKind};
use crate::identity::{IDENTITY_HEADER, Identity};
use crate::model::{
    Created, ENDPOINT_CORRELATION_KEY, Endpoint, EndpointType, EventLogEntry, HistoryEntry,
    HistoryFilter, Listing, NewEndpoint, Page,
};
use crate::paths::{ApiPaths, Route};

/// Sequential client for the notifications backend.
///
/// Internal API calls (bundles, applications, event types) go out without an
/// identity; every public API call takes the caller's [`Identity`].
pub struct NotificationsClient {
    http: reqwest::Client,
    paths: ApiPaths,
}

impl NotificationsClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            http: reqwest::Client::new(),
            paths: ApiPaths::new(config)?,
        })
    }

    pub fn paths(&self) -> &ApiPaths {
        &self.paths
    }

    pub(crate) fn request(
        &self,
        method: Method,
        route: Route<'_>,
        identity: Option<&Identity>,
    ) -> RequestBuilder {
        let url = self.paths.url(route);
        tracing::debug!(%method, %url, "sending request");
        let req = self.http.request(method, url);
        match identity {
            Some(identity) => req.header(IDENTITY_HEADER, identity.as_str()),
            None => req,
        }
    }

    /// POSTs a creation payload and returns the id the backend assigned.
    pub(crate) async fn create<B: Serialize + ?Sized>(
        &self,
        kind: ResourceKind,
        route: Route<'_>,
        body: &B,
        identity: Option<&Identity>,
    ) -> Result<String, ClientError> {
        let resp = self
            .request(Method::POST, route, identity)
            .json(body)
            .send()
            .await?;
        let status = resp.status();
        let text = resp.text().await?;
        tracing::info!(%kind, status = status.as_u16(), "create request answered");

        if !status.is_success() {
            tracing::error!(%kind, status = status.as_u16(), body = %text, "create rejected");
            return Err(CreationError {
                kind,
                status: status.as_u16(),
                body: text,
            }
            .into());
        }

        let created: Created = serde_json::from_str(&text).map_err(|source| ClientError::Decode {
            resource: kind.as_str(),
            source,
        })?;
        tracing::info!(%kind, id = %created.id, "created");
        Ok(created.id)
    }

    async fn delete(
        &self,
        kind: ResourceKind,
        route: Route<'_>,
        identity: Option<&Identity>,
    ) -> Result<StatusCode, ClientError> {
        let status = self
            .request(Method::DELETE, route, identity)
            .send()
            .await?
            .status();
        if status.is_success() {
            tracing::info!(%kind, status = status.as_u16(), "delete answered");
        } else {
            tracing::warn!(%kind, status = status.as_u16(), "delete answered");
        }
        Ok(status)
    }

    /// PUTs a full association set. The backend replaces whatever was linked
    /// before, so `ids` has to be the complete desired set.
    async fn replace_links(
        &self,
        what: &'static str,
        route: Route<'_>,
        ids: &[String],
        identity: &Identity,
    ) -> Result<StatusCode, ClientError> {
        let status = self
            .request(Method::PUT, route, Some(identity))
            .json(ids)
            .send()
            .await?
            .status();
        tracing::info!(what, count = ids.len(), status = status.as_u16(), "links replaced");
        Ok(status)
    }

    async fn read<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        route: Route<'_>,
        query: &[(&str, String)],
        identity: &Identity,
    ) -> Result<T, ClientError> {
        let resp = self
            .request(Method::GET, route, Some(identity))
            .query(query)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let reason = if body.is_empty() {
                status.canonical_reason().unwrap_or_default().to_string()
            } else {
                body
            };
            return Err(ClientError::Read {
                resource,
                status: status.as_u16(),
                reason,
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode { resource, source })
    }

    /// Creates an endpoint. Never looks for an existing one: calling this
    /// twice with the same name yields two endpoints.
    ///
    /// A fresh correlation id is stored in `properties` under
    /// [`ENDPOINT_CORRELATION_KEY`].
    pub async fn create_endpoint(
        &self,
        name: &str,
        identity: &Identity,
        mut properties: Map<String, Value>,
        endpoint_type: EndpointType,
    ) -> Result<String, ClientError> {
        properties.insert(
            ENDPOINT_CORRELATION_KEY.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        let body = NewEndpoint {
            name,
            description: name,
            enabled: true,
            properties,
            endpoint_type,
        };
        self.create(ResourceKind::Endpoint, Route::Endpoints, &body, Some(identity))
            .await
    }

    pub async fn list_endpoints(&self, identity: &Identity) -> Result<Vec<Endpoint>, ClientError> {
        let listing: Listing<Endpoint> =
            self.read("endpoints", Route::Endpoints, &[], identity).await?;
        Ok(listing.into_vec())
    }

    pub async fn delete_bundle(&self, id: &str) -> Result<StatusCode, ClientError> {
        self.delete(ResourceKind::Bundle, Route::Bundle(id), None).await
    }

    pub async fn delete_application(&self, id: &str) -> Result<StatusCode, ClientError> {
        self.delete(ResourceKind::Application, Route::Application(id), None)
            .await
    }

    pub async fn delete_endpoint(
        &self,
        id: &str,
        identity: &Identity,
    ) -> Result<StatusCode, ClientError> {
        self.delete(ResourceKind::Endpoint, Route::Endpoint(id), Some(identity))
            .await
    }

    /// Sets the endpoints a behavior group triggers.
    pub async fn link_behavior_group_endpoints(
        &self,
        behavior_group_id: &str,
        endpoint_ids: &[String],
        identity: &Identity,
    ) -> Result<StatusCode, ClientError> {
        self.replace_links(
            "behavior group actions",
            Route::BehaviorGroupActions(behavior_group_id),
            endpoint_ids,
            identity,
        )
        .await
    }

    /// Sets the behavior groups an event type triggers.
    pub async fn link_event_type_behavior_groups(
        &self,
        event_type_id: &str,
        behavior_group_ids: &[String],
        identity: &Identity,
    ) -> Result<StatusCode, ClientError> {
        self.replace_links(
            "event type behavior groups",
            Route::EventTypeBehaviorGroups(event_type_id),
            behavior_group_ids,
            identity,
        )
        .await
    }

    /// Links one endpoint straight to an event type (pre behavior group API).
    pub async fn add_endpoint_to_event_type(
        &self,
        event_type_id: &str,
        endpoint_id: &str,
        identity: &Identity,
    ) -> Result<StatusCode, ClientError> {
        let status = self
            .request(
                Method::PUT,
                Route::EventTypeEndpoint(event_type_id, endpoint_id),
                Some(identity),
            )
            .send()
            .await?
            .status();
        tracing::info!(event_type_id, endpoint_id, status = status.as_u16(), "endpoint linked");
        Ok(status)
    }

    /// Endpoints directly linked to an event type.
    pub async fn event_type_endpoints(
        &self,
        event_type_id: &str,
        identity: &Identity,
    ) -> Result<Vec<Endpoint>, ClientError> {
        let listing: Listing<Endpoint> = self
            .read(
                "event type endpoints",
                Route::EventTypeEndpoints(event_type_id),
                &[],
                identity,
            )
            .await?;
        Ok(listing.into_vec())
    }

    pub async fn endpoint_history(
        &self,
        endpoint_id: &str,
        limit: u32,
        identity: &Identity,
    ) -> Result<Vec<HistoryEntry>, ClientError> {
        let query = [
            ("include_detail", "true".to_string()),
            ("limit", limit.to_string()),
        ];
        let listing: Listing<HistoryEntry> = self
            .read(
                "endpoint history",
                Route::EndpointHistory(endpoint_id),
                &query,
                identity,
            )
            .await?;
        Ok(listing.into_vec())
    }

    /// First page of the event log matching `filter`.
    pub async fn fetch_history(
        &self,
        filter: &HistoryFilter,
        identity: &Identity,
    ) -> Result<Vec<EventLogEntry>, ClientError> {
        let page: Page<EventLogEntry> = self
            .read("event log", Route::Events, &filter.query(), identity)
            .await?;
        Ok(page.data)
    }
}
