//! Client for the notifications platform internal and public HTTP APIs.
//!
//! The core of this crate is find-or-create reconciliation: every resource
//! with a natural key (bundle, application, event type, behavior group) is
//! first looked up under its parent scope and only created when absent.
//! Endpoints are the exception and are always created fresh.
//!
//! ```text
//!  add_application(bundle, name)
//!        │
//!        ▼
//!  GET  /internal/bundles/{bundle}/applications ──► Found(id) ──► return id
//!        │
//!        │ NotFound / TransportError
//!        ▼
//!  POST /internal/applications ──► 2xx ──► return new id
//!                              └─► non-2xx ──► ClientError::Creation
//! ```
//!
//! The client never terminates the process. Callers decide what a
//! [`ClientError::Creation`] means for them.

pub mod client;
pub mod config;
pub mod error;
pub mod identity;
pub mod lookup;
pub mod model;
pub mod paths;
mod reconcile;

pub use client::NotificationsClient;
pub use config::ClientConfig;
pub use error::{ClientError, CreationError, ResourceKind};
pub use identity::{IDENTITY_HEADER, Identity};
pub use lookup::{Lookup, LookupFailure};
pub use model::*;
pub use paths::{ApiPaths, Route};
