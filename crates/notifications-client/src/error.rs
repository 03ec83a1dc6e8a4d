use std::fmt;

use thiserror::Error;

/// The kind of remote resource an operation acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Bundle,
    Application,
    EventType,
    BehaviorGroup,
    Endpoint,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Application => "application",
            Self::EventType => "event type",
            Self::BehaviorGroup => "behavior group",
            Self::Endpoint => "endpoint",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A create request answered with a non-2xx status.
///
/// Earlier successful creations of the same run are left in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("creating {kind} failed (HTTP {status}): {body}")]
pub struct CreationError {
    pub kind: ResourceKind,
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("Base URL cannot carry a path: {0}")]
    BaseUrlNotHierarchical(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Creation(#[from] CreationError),

    #[error("Reading {resource} failed (HTTP {status}): {reason}")]
    Read {
        resource: &'static str,
        status: u16,
        reason: String,
    },

    #[error("Failed to parse {resource} response: {source}")]
    Decode {
        resource: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Remote status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Creation(err) => Some(err.status),
            Self::Read { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creation_error_message_names_kind_and_status() {
        let err = ClientError::from(CreationError {
            kind: ResourceKind::EventType,
            status: 409,
            body: "duplicate".into(),
        });
        assert_eq!(
            err.to_string(),
            "creating event type failed (HTTP 409): duplicate"
        );
        assert_eq!(err.status(), Some(409));
    }

    #[test]
    fn read_error_exposes_status() {
        let err = ClientError::Read {
            resource: "endpoint history",
            status: 403,
            reason: "Forbidden".into(),
        };
        assert_eq!(err.status(), Some(403));
    }
}
