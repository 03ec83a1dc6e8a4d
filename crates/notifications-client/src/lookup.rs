use std::fmt;

/// Why a lookup could not give a definite answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The collection read answered with a non-2xx status.
    Status(u16),
    /// The request never got a response.
    Transport(String),
    /// The response body was not the expected list.
    Decode(String),
}

impl fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "HTTP {status}"),
            Self::Transport(msg) => write!(f, "transport error: {msg}"),
            Self::Decode(msg) => write!(f, "unreadable response: {msg}"),
        }
    }
}

/// Outcome of looking a resource up by its natural key.
///
/// Find-or-create treats [`Lookup::TransportError`] exactly like
/// [`Lookup::NotFound`]: a failed read leads to a create attempt. Callers that
/// need to tell "definitely absent" from "could not check" match on the
/// variants instead of calling [`Lookup::into_id`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(String),
    NotFound,
    TransportError(LookupFailure),
}

impl Lookup {
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Found(id) => Some(id),
            _ => None,
        }
    }

    /// Collapses the lookup into the soft "found or not" answer.
    pub fn into_id(self) -> Option<String> {
        match self {
            Self::Found(id) => Some(id),
            Self::NotFound | Self::TransportError(_) => None,
        }
    }
}
