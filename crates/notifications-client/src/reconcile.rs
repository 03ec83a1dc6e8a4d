//! Find-or-create for every resource that has a natural key.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::client::NotificationsClient;
use crate::error::{ClientError, ResourceKind};
use crate::identity::Identity;
use crate::lookup::{Lookup, LookupFailure};
use crate::model::{
    Application, BehaviorGroup, Bundle, EventType, Keyed, NewApplication, NewBehaviorGroup,
    NewBundle, NewEventType,
};
use crate::paths::Route;

impl NotificationsClient {
    /// Reads a collection and picks the first member whose natural key
    /// equals `key` (case-sensitive).
    async fn lookup<T>(&self, route: Route<'_>, identity: Option<&Identity>, key: &str) -> Lookup
    where
        T: DeserializeOwned + Keyed,
    {
        self.find_member::<T>(route, identity, key)
            .await
            .map(|found| match found {
                Some(item) => Lookup::Found(item.id().to_string()),
                None => Lookup::NotFound,
            })
            .unwrap_or_else(Lookup::TransportError)
    }

    async fn find_member<T>(
        &self,
        route: Route<'_>,
        identity: Option<&Identity>,
        key: &str,
    ) -> Result<Option<T>, LookupFailure>
    where
        T: DeserializeOwned + Keyed,
    {
        let resp = self
            .request(Method::GET, route, identity)
            .send()
            .await
            .map_err(|e| LookupFailure::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status.as_u16()));
        }
        let items: Vec<T> = resp
            .json()
            .await
            .map_err(|e| LookupFailure::Decode(e.to_string()))?;
        Ok(items.into_iter().find(|item| item.natural_key() == key))
    }

    async fn find_or_create<B: Serialize>(
        &self,
        kind: ResourceKind,
        key: &str,
        existing: Lookup,
        create: Route<'_>,
        body: &B,
        identity: Option<&Identity>,
    ) -> Result<String, ClientError> {
        match existing {
            Lookup::Found(id) => {
                tracing::debug!(%kind, key, %id, "already present");
                return Ok(id);
            }
            Lookup::NotFound => {}
            // A failed read is indistinguishable from absence here; an outage
            // surfaces on the create that follows.
            Lookup::TransportError(failure) => {
                tracing::warn!(%kind, key, %failure, "lookup failed, treating as absent");
            }
        }
        self.create(kind, create, body, identity).await
    }

    pub async fn find_bundle(&self, name: &str) -> Lookup {
        self.lookup::<Bundle>(Route::Bundles, None, name).await
    }

    /// Returns the id of bundle `name`, creating it if needed. An existing
    /// bundle is returned as is, even if its display name differs.
    pub async fn add_bundle(&self, name: &str, display_name: &str) -> Result<String, ClientError> {
        let existing = self.find_bundle(name).await;
        let body = NewBundle { name, display_name };
        self.find_or_create(ResourceKind::Bundle, name, existing, Route::Bundles, &body, None)
            .await
    }

    pub async fn find_application(&self, bundle_id: &str, name: &str) -> Lookup {
        self.lookup::<Application>(Route::BundleApplications(bundle_id), None, name)
            .await
    }

    pub async fn add_application(
        &self,
        bundle_id: &str,
        name: &str,
        display_name: &str,
    ) -> Result<String, ClientError> {
        let existing = self.find_application(bundle_id, name).await;
        let body = NewApplication {
            name,
            display_name,
            bundle_id,
        };
        self.find_or_create(
            ResourceKind::Application,
            name,
            existing,
            Route::Applications,
            &body,
            None,
        )
        .await
    }

    pub async fn find_event_type(&self, application_id: &str, name: &str) -> Lookup {
        self.lookup::<EventType>(Route::ApplicationEventTypes(application_id), None, name)
            .await
    }

    /// Like [`find_event_type`](Self::find_event_type) but hands back the
    /// whole record. Lookup failures read as `None`.
    pub async fn find_event_type_record(
        &self,
        application_id: &str,
        name: &str,
    ) -> Option<EventType> {
        match self
            .find_member::<EventType>(Route::ApplicationEventTypes(application_id), None, name)
            .await
        {
            Ok(found) => found,
            Err(failure) => {
                tracing::warn!(application_id, name, %failure, "event type lookup failed");
                None
            }
        }
    }

    pub async fn add_event_type(
        &self,
        application_id: &str,
        name: &str,
        display_name: &str,
    ) -> Result<String, ClientError> {
        let existing = self.find_event_type(application_id, name).await;
        let body = NewEventType {
            name,
            display_name,
            application_id,
        };
        self.find_or_create(
            ResourceKind::EventType,
            name,
            existing,
            Route::EventTypes,
            &body,
            None,
        )
        .await
    }

    pub async fn find_behavior_group(
        &self,
        bundle_id: &str,
        display_name: &str,
        identity: &Identity,
    ) -> Lookup {
        self.lookup::<BehaviorGroup>(
            Route::BundleBehaviorGroups(bundle_id),
            Some(identity),
            display_name,
        )
        .await
    }

    pub async fn add_behavior_group(
        &self,
        bundle_id: &str,
        display_name: &str,
        identity: &Identity,
    ) -> Result<String, ClientError> {
        let existing = self
            .find_behavior_group(bundle_id, display_name, identity)
            .await;
        let body = NewBehaviorGroup {
            display_name,
            bundle_id,
        };
        self.find_or_create(
            ResourceKind::BehaviorGroup,
            display_name,
            existing,
            Route::BehaviorGroups,
            &body,
            Some(identity),
        )
        .await
    }
}
